// Copyright (C) 2020-2026 Andy Kurnia.

// Plain prefix tree over A-Z, kept in one arena. Each node's children are a
// sibling chain in ascending letter order. Index 0 is the root; 0 is never a
// valid child index, so it doubles as "none" in the links.

pub type NodeIndex = u32;

#[derive(Clone, Copy, Debug)]
pub struct Node {
    letter: u8,
    accepts: bool,
    first_child: NodeIndex,
    next_sibling: NodeIndex,
}

impl Node {
    #[inline(always)]
    pub fn letter(&self) -> u8 {
        self.letter
    }

    #[inline(always)]
    pub fn accepts(&self) -> bool {
        self.accepts
    }
}

pub struct Trie {
    nodes: Vec<Node>,
    num_words: usize,
}

impl std::ops::Index<NodeIndex> for Trie {
    type Output = Node;

    #[inline(always)]
    fn index(&self, i: NodeIndex) -> &Node {
        &self.nodes[i as usize]
    }
}

pub struct Children<'a> {
    trie: &'a Trie,
    p: NodeIndex,
}

impl Iterator for Children<'_> {
    type Item = (u8, NodeIndex);

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.p == 0 {
            return None;
        }
        let here = self.p;
        let node = &self.trie[here];
        self.p = node.next_sibling;
        Some((node.letter, here))
    }
}

// uppercased; None if anything is outside A-Z.
fn normalize(word: &str) -> Option<Vec<u8>> {
    let word = word.trim();
    if word.is_empty() {
        return None;
    }
    word.bytes()
        .map(|b| {
            let b = b.to_ascii_uppercase();
            if b.is_ascii_uppercase() { Some(b) } else { None }
        })
        .collect()
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                letter: 0,
                accepts: false,
                first_child: 0,
                next_sibling: 0,
            }],
            num_words: 0,
        }
    }

    // Words are uppercased. Anything with a non-letter is skipped.
    pub fn build<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    // false if the word was skipped or already present.
    pub fn insert(&mut self, word: &str) -> bool {
        let Some(letters) = normalize(word) else {
            return false;
        };
        let mut p = self.root();
        for &letter in &letters {
            p = self.seek_or_insert(p, letter);
        }
        let node = &mut self.nodes[p as usize];
        if node.accepts {
            return false;
        }
        node.accepts = true;
        self.num_words += 1;
        true
    }

    fn seek_or_insert(&mut self, p: NodeIndex, letter: u8) -> NodeIndex {
        let mut prev = 0;
        let mut q = self[p].first_child;
        while q != 0 && self[q].letter < letter {
            prev = q;
            q = self[q].next_sibling;
        }
        if q != 0 && self[q].letter == letter {
            return q;
        }
        let new_index = self.nodes.len() as NodeIndex;
        self.nodes.push(Node {
            letter,
            accepts: false,
            first_child: 0,
            next_sibling: q,
        });
        if prev == 0 {
            self.nodes[p as usize].first_child = new_index;
        } else {
            self.nodes[prev as usize].next_sibling = new_index;
        }
        new_index
    }

    #[inline(always)]
    pub fn root(&self) -> NodeIndex {
        0
    }

    #[inline(always)]
    pub fn accepts(&self, p: NodeIndex) -> bool {
        self[p].accepts
    }

    #[inline(always)]
    pub fn children(&self, p: NodeIndex) -> Children<'_> {
        Children {
            trie: self,
            p: self[p].first_child,
        }
    }

    #[inline(always)]
    pub fn seek(&self, p: NodeIndex, letter: u8) -> Option<NodeIndex> {
        let mut q = self[p].first_child;
        while q != 0 {
            let node = &self[q];
            if node.letter == letter {
                return Some(q);
            }
            if node.letter > letter {
                break;
            }
            q = node.next_sibling;
        }
        None
    }

    // follows letters from p. None as soon as an edge is missing.
    #[inline(always)]
    pub fn walk<I: IntoIterator<Item = u8>>(&self, mut p: NodeIndex, letters: I) -> Option<NodeIndex> {
        for letter in letters {
            p = self.seek(p, letter)?;
        }
        Some(p)
    }

    pub fn prefix_node(&self, prefix: &str) -> Option<NodeIndex> {
        self.walk(self.root(), prefix.bytes().map(|b| b.to_ascii_uppercase()))
    }

    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty()
            && self
                .prefix_node(word)
                .is_some_and(|p| self.accepts(p))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.num_words
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.num_words == 0
    }

    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}
