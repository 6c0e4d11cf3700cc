/// told about every successful schedule, whatever it does has no effect on the timer
pub trait ReviewPrompt {
    fn maybe_ask_for_review(&mut self);
}

impl<F: FnMut()> ReviewPrompt for F {
    fn maybe_ask_for_review(&mut self) {
        self();
    }
}
