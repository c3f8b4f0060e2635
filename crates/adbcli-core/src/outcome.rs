/// What an operation reports back to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    /// The operation itself succeeded but a follow-up step did not.
    Warning(String),
    Failure(String),
    Cancelled(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(m) | Outcome::Warning(m) | Outcome::Failure(m) | Outcome::Cancelled(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_) | Outcome::Warning(_))
    }
}
