/// Named invalidation signals delivered over the server's push channel.
/// The message is informational only: it gets logged, never parsed. Both
/// signals mean the same thing to the feed — refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushSignal {
    ExcelUpdated { message: String },
    DataReloaded { message: String },
}

impl PushSignal {
    /// Maps a wire event name to a signal; unknown names are ignored by the
    /// transport adapter rather than surfaced as errors.
    pub fn from_event(name: &str, message: String) -> Option<PushSignal> {
        match name {
            "excel_updated" => Some(PushSignal::ExcelUpdated { message }),
            "data_reloaded" => Some(PushSignal::DataReloaded { message }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PushSignal::ExcelUpdated { .. } => "excel_updated",
            PushSignal::DataReloaded { .. } => "data_reloaded",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PushSignal::ExcelUpdated { message } | PushSignal::DataReloaded { message } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_event_names_map_to_signals() {
        let sig = PushSignal::from_event("excel_updated", "Excel file has been updated".into());
        assert_eq!(sig.as_ref().map(|s| s.name()), Some("excel_updated"));

        let sig = PushSignal::from_event("data_reloaded", "Data has been reloaded".into());
        assert_eq!(sig.as_ref().map(|s| s.name()), Some("data_reloaded"));
    }

    #[test]
    fn unknown_event_names_are_dropped() {
        assert_eq!(PushSignal::from_event("connect", String::new()), None);
    }
}
