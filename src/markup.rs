// Narrow tree-navigation interface used by the extractor.
//
// The extractor only needs to search down, search up and read text, so the
// parser's own object model stays behind this trait.
use scraper::{ElementRef, Html};

use crate::config::NodeSpec;

pub trait MarkupNode: Sized {
    fn tag_name(&self) -> &str;

    fn classes(&self) -> Vec<&str>;

    // First element below this one (document order) accepted by `predicate`.
    fn find_descendant<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool;

    // Every element below this one accepted by `predicate`, in document order.
    fn find_descendants<P>(&self, predicate: P) -> Vec<Self>
    where
        P: Fn(&Self) -> bool;

    // Nearest enclosing element accepted by `predicate`.
    fn find_ancestor<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool;

    // Leading text of the node: its first child when that child is text.
    // Anything after a nested element is not part of it.
    fn own_text(&self) -> String;

    // Concatenated text of the whole subtree.
    fn full_text(&self) -> String;

    // Subtree text with `excluded` and everything below it left out.
    fn text_excluding(&self, excluded: &Self) -> String;

    fn is(&self, spec: &NodeSpec) -> bool {
        spec.matches(self.tag_name(), &self.classes())
    }

    fn find(&self, spec: &NodeSpec) -> Option<Self> {
        self.find_descendant(|node| node.is(spec))
    }

    fn find_all(&self, spec: &NodeSpec) -> Vec<Self> {
        self.find_descendants(|node| node.is(spec))
    }

    fn find_parent(&self, spec: &NodeSpec) -> Option<Self> {
        self.find_ancestor(|node| node.is(spec))
    }
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn classes(&self) -> Vec<&str> {
        self.value().classes().collect()
    }

    fn find_descendant<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| predicate(element))
    }

    fn find_descendants<P>(&self, predicate: P) -> Vec<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| predicate(element))
            .collect()
    }

    fn find_ancestor<P>(&self, predicate: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.ancestors()
            .filter_map(ElementRef::wrap)
            .find(|element| predicate(element))
    }

    fn own_text(&self) -> String {
        self.first_child()
            .and_then(|child| child.value().as_text().map(|text| text.to_string()))
            .unwrap_or_default()
    }

    fn full_text(&self) -> String {
        self.text().collect()
    }

    fn text_excluding(&self, excluded: &Self) -> String {
        let skip = **excluded;
        let mut out = String::new();
        for node in self.descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if node.ancestors().any(|ancestor| ancestor == skip) {
                continue;
            }
            out.push_str(text);
        }
        out
    }
}

// Parsed document; offers are read from its root element
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}
