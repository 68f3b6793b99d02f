use std::collections::HashMap;

use crate::lex::token::{ Keyword, LexemeTag };

pub const KEYWORD_LIST: &[Keyword] = &[
    Keyword::LET,
    Keyword::VAR,
];

pub struct KeywordMatcher {
    start_node: MatcherNode,
}

#[derive(Default)]
struct MatcherNode {
    children: HashMap<char, Box<MatcherNode>>,
    tag: Option<LexemeTag>,
}

impl KeywordMatcher {
    pub fn new() -> Self {
        let mut start_node = MatcherNode::default();

        for keyword in KEYWORD_LIST {
            let mut node = &mut start_node;

            for c in keyword.spelling().chars() {
                node = node.children.entry(c).or_default().as_mut();
            }

            node.tag = Some(LexemeTag::from(*keyword));
        }

        KeywordMatcher { start_node }
    }

    pub fn search_str(&self, s: &str) -> Option<LexemeTag> {
        let mut curr = &self.start_node;

        for c in s.chars() {
            curr = curr.children.get(&c)?;
        }

        curr.tag
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        KeywordMatcher::new()
    }
}
