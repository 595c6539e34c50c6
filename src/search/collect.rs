//! Flattening document text into searchable runs.

use crate::doc::{Node, Region};

/// Decides whether a container groups the text beneath it into one
/// concatenated matching unit. The default treats list items that way: a
/// term split across inline-formatted fragments inside one item is still
/// found, while ordinary paragraphs are matched leaf by leaf.
pub type GroupPredicate = fn(&Node) -> bool;

/// Default grouping: list-item containers.
pub fn list_item_group(node: &Node) -> bool {
    matches!(node.type_name(), "list_item" | "li")
}

/// How many of the outermost ancestors are inspected when looking for a
/// grouping container above a leaf.
const GROUP_ANCESTOR_DEPTH: usize = 3;

/// Which matching unit a run belongs to. `Solo` runs are keyed by their own
/// leaf position and matched individually; `Grouped` runs share the start
/// position of their grouping container and are concatenated before
/// matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GroupKey {
    Solo(usize),
    Grouped(usize),
}

/// One text leaf's content with its absolute start position.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    pub start: usize,
    pub group: GroupKey,
}

/// Collect every text leaf overlapping `region`, in document order.
pub fn collect_runs(doc: &Node, region: Region, is_group: GroupPredicate) -> Vec<TextRun> {
    let mut runs = Vec::new();
    doc.nodes_between(region.from, region.to, &mut |node, pos| {
        if let Some(text) = node.text_content() {
            let group = doc
                .ancestors_at(pos)
                .iter()
                .take(GROUP_ANCESTOR_DEPTH)
                .find(|a| is_group(a.node))
                .map(|a| GroupKey::Grouped(a.pos))
                .unwrap_or(GroupKey::Solo(pos));
            runs.push(TextRun {
                text: text.to_string(),
                start: pos,
                group,
            });
        }
        true
    });
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_leaves_stay_solo() {
        let doc = Node::doc(vec![
            Node::paragraph(vec![Node::text("Hello"), Node::text("World")]),
            Node::paragraph(vec![Node::text("next")]),
        ]);
        let runs = collect_runs(&doc, Region::whole(&doc), list_item_group);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].group, GroupKey::Solo(1));
        assert_eq!(runs[1].group, GroupKey::Solo(6));
        assert_eq!(runs[2].group, GroupKey::Solo(13));
    }

    #[test]
    fn list_item_leaves_share_a_group() {
        let doc = Node::doc(vec![Node::bullet_list(vec![
            Node::list_item(vec![Node::paragraph(vec![
                Node::text("Hello"),
                Node::text("World"),
            ])]),
            Node::list_item(vec![Node::paragraph(vec![Node::text("other")])]),
        ])]);
        let runs = collect_runs(&doc, Region::whole(&doc), list_item_group);
        assert_eq!(runs.len(), 3);
        // both leaves of the first item key on the item's start position
        assert_eq!(runs[0].group, runs[1].group);
        assert!(matches!(runs[0].group, GroupKey::Grouped(1)));
        // the second item is a different group
        assert_ne!(runs[1].group, runs[2].group);
    }

    #[test]
    fn region_limits_the_walk() {
        let doc = Node::doc(vec![
            Node::paragraph(vec![Node::text("first")]),
            Node::paragraph(vec![Node::text("second")]),
        ]);
        let region = Region::new(0, 7).unwrap();
        let runs = collect_runs(&doc, region, list_item_group);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].text, "first");
    }

    #[test]
    fn custom_predicate_groups_other_containers() {
        fn quotes(node: &Node) -> bool {
            node.type_name() == "blockquote"
        }
        let doc = Node::doc(vec![Node::blockquote(vec![Node::paragraph(vec![
            Node::text("a"),
            Node::text("b"),
        ])])]);
        let runs = collect_runs(&doc, Region::whole(&doc), quotes);
        assert_eq!(runs[0].group, runs[1].group);
        assert!(matches!(runs[0].group, GroupKey::Grouped(0)));
    }
}
