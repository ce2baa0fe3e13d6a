/// HTML-flavoured text ready to be handed to a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    text: String,
}

impl NotificationMessage {
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}
