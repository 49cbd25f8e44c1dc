#![forbid(unsafe_code)]

use std::collections::HashMap;

// ***************************************************************************
//                                CounterView
// ***************************************************************************
/// A snapshot of one counter as returned by the store.  Views are detached
/// copies; changing the store afterwards does not affect them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub name: String,
    pub value: u64,
}

impl CounterView {
    pub fn new(name: String, value: u64) -> Self {
        Self {name, value}
    }

    /** Render the view as the single-entry payload clients receive, which
     * uses the counter name as its key:  {"foo": 3}
     */
    pub fn into_payload(self) -> HashMap<String, u64> {
        HashMap::from([(self.name, self.value)])
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::CounterView;

    #[test]
    fn payload_is_keyed_by_name() {
        let payload = CounterView::new("hits".to_string(), 7).into_payload();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("hits"), Some(&7));
    }
}
