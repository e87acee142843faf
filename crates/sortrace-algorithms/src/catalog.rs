//! Algorithm Catalog: display metadata for each algorithm
use crate::AlgorithmKind;
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: AlgorithmKind,
    pub name: &'static str,
    pub description: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

static CATALOG: Lazy<Vec<AlgorithmInfo>> = Lazy::new(|| {
    vec![
        AlgorithmInfo {
            id: AlgorithmKind::Bubble,
            name: "Bubble Sort",
            description: "A simple sorting algorithm that repeatedly steps through the list, compares adjacent elements and swaps them if they are in the wrong order.",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
        },
        AlgorithmInfo {
            id: AlgorithmKind::Selection,
            name: "Selection Sort",
            description: "Finds the minimum element from the unsorted portion and places it at the beginning. Repeats until the entire array is sorted.",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
        },
        AlgorithmInfo {
            id: AlgorithmKind::Insertion,
            name: "Insertion Sort",
            description: "Builds the final sorted array one item at a time. It takes elements from the unsorted portion and inserts them into their correct position.",
            time_complexity: "O(n²)",
            space_complexity: "O(1)",
        },
        AlgorithmInfo {
            id: AlgorithmKind::Merge,
            name: "Merge Sort",
            description: "A divide-and-conquer algorithm that divides the array into halves, sorts them separately, and then merges them back together.",
            time_complexity: "O(n log n)",
            space_complexity: "O(n)",
        },
        AlgorithmInfo {
            id: AlgorithmKind::Quick,
            name: "Quick Sort",
            description: "A divide-and-conquer algorithm that picks a pivot element and partitions the array around it, then recursively sorts the sub-arrays.",
            time_complexity: "O(n log n)",
            space_complexity: "O(log n)",
        },
        AlgorithmInfo {
            id: AlgorithmKind::Heap,
            name: "Heap Sort",
            description: "Uses a binary heap data structure. First builds a max-heap, then repeatedly extracts the maximum element and places it at the end.",
            time_complexity: "O(n log n)",
            space_complexity: "O(1)",
        },
    ]
});

/// All entries, in selector order
pub fn catalog() -> &'static [AlgorithmInfo] {
    &CATALOG
}

pub fn info(kind: AlgorithmKind) -> &'static AlgorithmInfo {
    &CATALOG[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_kinds() {
        for kind in AlgorithmKind::ALL {
            assert_eq!(info(kind).id, kind);
        }
        assert_eq!(catalog().len(), AlgorithmKind::ALL.len());
    }

    #[test]
    fn test_merge_entry() {
        let merge = info(AlgorithmKind::Merge);
        assert_eq!(merge.name, "Merge Sort");
        assert_eq!(merge.space_complexity, "O(n)");
    }
}
