//! Prefix tree used for menu-code and username completion.

use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// A set of words supporting prefix lookup.
///
/// # Example
///
/// ```
/// use taskmgr::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("va");
/// trie.insert("view-all");
/// trie.insert("vm");
///
/// assert_eq!(trie.completions("v"), vec!["va", "view-all", "vm"]);
/// assert_eq!(trie.completions("vi"), vec!["view-all"]);
/// assert!(trie.contains("vm"));
/// assert!(!trie.contains("v"));
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: TrieNode,
    count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word; empty words and duplicates are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }

        if !node.terminal {
            node.terminal = true;
            self.count += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty() && self.find(word).is_some_and(|n| n.terminal)
    }

    /// All words starting with `prefix`, in sorted order.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(node) = self.find(prefix) {
            Self::collect(node, &mut prefix.to_string(), &mut results);
        }
        results
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.count = 0;
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in prefix.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    // Children are ordered, so a depth-first walk yields sorted output.
    fn collect(node: &TrieNode, prefix: &mut String, results: &mut Vec<String>) {
        if node.terminal {
            results.push(prefix.clone());
        }
        for (ch, child) in &node.children {
            prefix.push(*ch);
            Self::collect(child, prefix, results);
            prefix.pop();
        }
    }
}
