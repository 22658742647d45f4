//! User notification and confirmation.

/// Acknowledgment shown after an item is added.
pub const ADDED_TO_CART: &str = "Added to cart.";

/// Question asked before the cart is cleared.
pub const CLEAR_CART_QUESTION: &str = "Clear cart from this device?";

/// Talks to the user on behalf of cart operations.
pub trait Prompter {
    /// Show a message that needs no answer.
    fn notify(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str) -> bool;
}

/// A [`Prompter`] whose confirmation answer is known ahead of time.
///
/// Over HTTP the browser asks the question before the request is sent
/// (`hx-confirm`), so the answer arrives with the request. Notifications are
/// collected and sent back with the response.
#[derive(Debug, Clone, Default)]
pub struct AnsweredPrompts {
    answer: bool,
    notices: Vec<String>,
    questions: Vec<String>,
}

impl AnsweredPrompts {
    /// Prompts that answer every question with `answer`.
    #[must_use]
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }

    /// Messages passed to [`Prompter::notify`], oldest first.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Questions passed to [`Prompter::confirm`], oldest first.
    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

impl Prompter for AnsweredPrompts {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_owned());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_owned());
        self.answer
    }
}
