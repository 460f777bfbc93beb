use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub title: String,
    pub description: Option<String>,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.level {
            ToastLevel::Success => "✓",
            ToastLevel::Error => "✗",
        };
        match &self.description {
            Some(description) => write!(f, "{} {}: {}", marker, self.title, description),
            None => write!(f, "{} {}", marker, self.title),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Toaster {
    queue: Vec<Toast>,
}

impl Toaster {
    pub fn success(&mut self, title: impl Into<String>, description: Option<String>) {
        self.push(ToastLevel::Success, title.into(), description);
    }

    pub fn error(&mut self, title: impl Into<String>, description: Option<String>) {
        self.push(ToastLevel::Error, title.into(), description);
    }

    fn push(&mut self, level: ToastLevel, title: String, description: Option<String>) {
        self.queue.push(Toast {
            level,
            title,
            description,
        });
    }

    pub fn last(&self) -> Option<&Toast> {
        self.queue.last()
    }

    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.queue)
    }
}
