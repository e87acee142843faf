//! Data Model: Element, State, Sequence
use serde::{Deserialize, Serialize};

/// Highlight state of a single element.
///
/// `Default` is the rest state. `Comparing`, `Swapping`, `Pivot` and `Current`
/// are transient and are cleared by the step that set them. `Sorted` is
/// terminal for the element within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Default,
    Comparing,
    Swapping,
    Sorted,
    Pivot,
    Current,
    /// Part of the presentation vocabulary for a collaborator's end-of-run
    /// styling. The engine itself never assigns it.
    Finished,
}

impl State {
    /// Whether the state must not survive the step that set it
    pub fn is_transient(self) -> bool {
        matches!(
            self,
            State::Comparing | State::Swapping | State::Pivot | State::Current
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub value: u32,
    pub state: State,
}

impl Element {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            state: State::Default,
        }
    }
}

/// Ordered collection of elements owned by exactly one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence {
    elements: Vec<Element>,
}

impl Sequence {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        Self {
            elements: values.into_iter().map(Element::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn value(&self, index: usize) -> u32 {
        self.elements[index].value
    }

    pub fn state(&self, index: usize) -> State {
        self.elements[index].state
    }

    pub fn set_state(&mut self, index: usize, state: State) {
        self.elements[index].state = state;
    }

    /// Overwrite one slot, used by merge write-back and insertion shifts.
    pub fn write(&mut self, index: usize, element: Element) {
        self.elements[index] = element;
    }

    /// Three-step exchange through a temporary.
    pub fn exchange(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let held = self.elements[a];
        self.elements[a] = self.elements[b];
        self.elements[b] = held;
    }

    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(|e| e.value).collect()
    }

    /// Copy with identical values and every state reset to `Default`.
    pub fn fresh_copy(&self) -> Self {
        Self::from_values(self.elements.iter().map(|e| e.value))
    }

    pub fn mark_all(&mut self, state: State) {
        for element in &mut self.elements {
            element.state = state;
        }
    }

    /// Tear-down after an interrupted run: transient highlights rest again.
    pub fn settle_transient(&mut self) {
        for element in &mut self.elements {
            if element.state.is_transient() {
                element.state = State::Default;
            }
        }
    }

    pub fn count_in(&self, state: State) -> usize {
        self.elements.iter().filter(|e| e.state == state).count()
    }

    pub fn is_non_decreasing(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value <= w[1].value)
    }

    /// Same multiset of values as `other`.
    pub fn is_permutation_of(&self, other: &Sequence) -> bool {
        let mut mine = self.values();
        let mut theirs = other.values();
        mine.sort_unstable();
        theirs.sort_unstable();
        mine == theirs
    }

    /// Content digest over the values only, so copies with different
    /// highlight states share a digest.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for element in &self.elements {
            hasher.update(&element.value.to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize())
    }
}

impl From<Vec<u32>> for Sequence {
    fn from(values: Vec<u32>) -> Self {
        Self::from_values(values)
    }
}
