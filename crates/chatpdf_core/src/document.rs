/// Whether the user has uploaded a document to chat against.
///
/// Owned by `AppState`; only the upload flow sets it and it never goes back
/// to false within one state instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentPresence {
    provided: bool,
}

impl DocumentPresence {
    pub fn read(&self) -> bool {
        self.provided
    }

    pub fn set(&mut self, provided: bool) {
        self.provided = provided;
    }
}
