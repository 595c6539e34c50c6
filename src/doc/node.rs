//! Tree-structured rich-text document nodes.
//!
//! Positions are byte offsets into a single global address space. A text
//! leaf's size is its UTF-8 byte length and its characters are addressable
//! at `leaf_start + i`. A container's size is its content size plus two
//! boundary tokens; its content starts one position past its own start.
//! The root's content occupies `0..content_size()`.

/// A single node in a document tree: either a text leaf or a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    type_name: String,
    object_id: Option<String>,
    textblock: bool,
    text: Option<String>,
    children: Vec<Node>,
}

/// A container on the ancestor chain above a position, with its start
/// position in the root's address space.
#[derive(Debug, Clone, Copy)]
pub struct Ancestor<'a> {
    pub node: &'a Node,
    pub pos: usize,
}

impl Node {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            type_name: "text".to_string(),
            object_id: None,
            textblock: false,
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// A textblock container: direct content is exclusively inline text.
    pub fn block(type_name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            type_name: type_name.into(),
            object_id: None,
            textblock: true,
            text: None,
            children,
        }
    }

    /// A structural container (lists, list items, quotes, the root).
    pub fn container(type_name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            type_name: type_name.into(),
            object_id: None,
            textblock: false,
            text: None,
            children,
        }
    }

    pub fn doc(children: Vec<Node>) -> Self {
        Self::container("doc", children)
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::block("paragraph", children)
    }

    pub fn heading(children: Vec<Node>) -> Self {
        Self::block("heading", children)
    }

    pub fn bullet_list(children: Vec<Node>) -> Self {
        Self::container("bullet_list", children)
    }

    pub fn list_item(children: Vec<Node>) -> Self {
        Self::container("list_item", children)
    }

    pub fn blockquote(children: Vec<Node>) -> Self {
        Self::container("blockquote", children)
    }

    /// Attach an identity attribute, as carried by application-addressable
    /// containers.
    pub fn with_object_id(mut self, id: impl Into<String>) -> Self {
        self.object_id = Some(id.into());
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// The leaf's text, `None` for containers.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_text_block(&self) -> bool {
        self.textblock
    }

    pub fn object_id(&self) -> Option<&str> {
        self.object_id.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Total footprint of this node in the address space.
    pub fn size(&self) -> usize {
        match &self.text {
            Some(text) => text.len(),
            None => self.content_size() + 2,
        }
    }

    /// Size of this node's content, excluding its own boundary tokens.
    pub fn content_size(&self) -> usize {
        self.children.iter().map(Node::size).sum()
    }

    /// Visit every node overlapping `(from, to)` in document order,
    /// calling `f(node, pos)` with the node's start position. Returning
    /// `false` prunes descent into that node's children; siblings are
    /// still visited.
    pub fn nodes_between<F>(&self, from: usize, to: usize, f: &mut F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        self.walk(from, to, 0, f);
    }

    fn walk<F>(&self, from: usize, to: usize, base: usize, f: &mut F)
    where
        F: FnMut(&Node, usize) -> bool,
    {
        let mut pos = base;
        for child in &self.children {
            let end = pos + child.size();
            if pos < to && end > from && f(child, pos) && !child.is_text() {
                child.walk(from, to, pos + 1, f);
            }
            pos = end;
        }
    }

    /// The chain of containers enclosing `pos`, outermost first, excluding
    /// the root itself and any leaf at the position.
    pub fn ancestors_at(&self, pos: usize) -> Vec<Ancestor<'_>> {
        let mut chain = Vec::new();
        let mut cur = self;
        let mut base = 0;
        'descend: loop {
            let mut child_pos = base;
            for child in &cur.children {
                let end = child_pos + child.size();
                if pos >= child_pos && pos < end {
                    if child.is_text() {
                        break 'descend;
                    }
                    chain.push(Ancestor {
                        node: child,
                        pos: child_pos,
                    });
                    cur = child;
                    base = child_pos + 1;
                    continue 'descend;
                }
                child_pos = end;
            }
            break;
        }
        chain
    }
}
