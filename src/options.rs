use crate::constants::DEFAULT_MAX_INDEX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Turn maps whose keys are all integers into sequences.
    pub arrayify: bool,
    /// Largest index an arrayified sequence may hold.
    pub max_index: usize,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_arrayify(mut self, arrayify: bool) -> Self {
        self.arrayify = arrayify;
        self
    }

    pub fn with_max_index(mut self, max_index: usize) -> Self {
        self.max_index = max_index;
        self
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            arrayify: true,
            max_index: DEFAULT_MAX_INDEX,
        }
    }
}
