// src/crawl/frontier.rs
// =============================================================================
// This module implements the crawl frontier: the queue of pages we still
// need to visit, plus the set of pages we already visited.
//
// How it works:
// 1. push() appends a (url, depth) pair to the back of the queue
// 2. pop() removes the pair at the front (FIFO = breadth-first order)
// 3. mark_visited() / is_visited() track which URLs were already popped
//
// Why FIFO?
// - FIFO guarantees breadth-first traversal
// - Breadth-first means a page's depth equals its link distance from a seed
// - That's what makes a "max depth" limit actually mean something
//
// Deduplication happens at POP time, not at push time. The same URL may sit
// in the queue more than once (two pages can link to the same target before
// either is processed), but it is only ever handed out once.
//
// Rust concepts:
// - VecDeque: Double-ended queue, efficient push_back/pop_front
// - HashSet: O(1) membership checks for visited URLs
// =============================================================================

use std::collections::{HashSet, VecDeque};

// A page waiting to be visited
//
// depth is how many link hops this URL is from a seed (seeds are depth 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

// The frontier: pending queue + visited set
//
// One Frontier is built fresh for every crawl run and owned by the
// controller, so there is no shared or leftover state between runs.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
}

impl Frontier {
    // Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    // Appends an entry to the back of the queue
    pub fn push(&mut self, entry: FrontierEntry) {
        self.queue.push_back(entry);
    }

    // Removes and returns the entry at the front of the queue
    //
    // Returns None when the queue is empty (the crawl is done)
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.queue.pop_front()
    }

    // Records that a URL has been popped and processed
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    // Checks whether a URL was already popped in this run
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, depth: usize) -> FrontierEntry {
        FrontierEntry {
            url: url.to_string(),
            depth,
        }
    }

    #[test]
    fn test_pop_is_fifo() {
        let mut frontier = Frontier::new();
        frontier.push(entry("https://x.test/a.html", 0));
        frontier.push(entry("https://x.test/b.html", 0));
        frontier.push(entry("https://x.test/c.html", 1));

        assert_eq!(frontier.pop().unwrap().url, "https://x.test/a.html");
        assert_eq!(frontier.pop().unwrap().url, "https://x.test/b.html");
        assert_eq!(frontier.pop().unwrap().url, "https://x.test/c.html");
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_duplicates_allowed_in_queue() {
        // Two pages may discover the same link; both copies can sit in the
        // queue. The controller collapses them via is_visited at pop time.
        let mut frontier = Frontier::new();
        frontier.push(entry("https://x.test/a.html", 1));
        frontier.push(entry("https://x.test/a.html", 1));

        assert!(frontier.pop().is_some());
        assert!(frontier.pop().is_some());
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_visited_tracking() {
        let mut frontier = Frontier::new();
        assert!(!frontier.is_visited("https://x.test/a.html"));

        frontier.mark_visited("https://x.test/a.html");
        assert!(frontier.is_visited("https://x.test/a.html"));
        assert!(!frontier.is_visited("https://x.test/b.html"));
    }
}
