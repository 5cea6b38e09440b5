/// Reference-length dialog shown once a calibration pair is complete.
#[derive(Default)]
pub struct ScalePromptState {
    pub open: bool,
    pub input: String,
    pub pixel_distance: f64,
    /// Validation message shown under the input.
    pub error: Option<String>,
    /// Focus the text field on the first frame the dialog is shown.
    pub focus_pending: bool,
}

impl ScalePromptState {
    pub fn request(&mut self, pixel_distance: f64) {
        self.open = true;
        self.input.clear();
        self.pixel_distance = pixel_distance;
        self.error = None;
        self.focus_pending = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    /// Parse the entered length. Range checking is left to the session.
    pub fn parsed_length(&self) -> Result<f64, String> {
        self.input
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", self.input.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_input() {
        let mut prompt = ScalePromptState::default();
        prompt.request(42.0);
        prompt.input = "  12.5 ".into();
        assert_eq!(prompt.parsed_length(), Ok(12.5));
        prompt.input = "abc".into();
        assert!(prompt.parsed_length().is_err());
    }

    #[test]
    fn request_resets_previous_entry() {
        let mut prompt = ScalePromptState::default();
        prompt.input = "7".into();
        prompt.error = Some("bad".into());
        prompt.request(3.0);
        assert!(prompt.open);
        assert!(prompt.input.is_empty());
        assert!(prompt.error.is_none());
    }
}
