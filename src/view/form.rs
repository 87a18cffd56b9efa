/// The signup input controls: an email field and the activity selector's
/// current choice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

impl SignupForm {
    pub fn clear(&mut self) {
        self.email.clear();
        self.activity.clear();
    }

    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.activity.is_empty()
    }
}
