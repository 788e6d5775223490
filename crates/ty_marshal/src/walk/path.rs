use core::fmt;

/// One step from a node to one of its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Segment {
    Key(String),
    Index(usize),
}

/// The location of the node being walked, for error messages.
#[derive(Default, Clone, Debug)]
pub(super) struct NodePath {
    stack: Vec<Segment>,
}

impl NodePath {
    #[inline]
    pub const fn new() -> Self {
        Self { stack: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, segment: Segment) {
        self.stack.push(segment);
    }

    #[inline]
    pub fn pop(&mut self) {
        self.stack.pop();
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stack.is_empty() {
            return f.write_str(".");
        }
        for (depth, segment) in self.stack.iter().enumerate() {
            match segment {
                Segment::Key(key) if depth == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NodePath, Segment};

    #[test]
    fn display() {
        let mut path = NodePath::new();
        assert_eq!(path.to_string(), ".");

        path.push(Segment::Key("items".into()));
        path.push(Segment::Index(2));
        path.push(Segment::Key("name".into()));
        assert_eq!(path.to_string(), "items[2].name");

        path.pop();
        path.pop();
        path.pop();
        path.push(Segment::Index(0));
        path.push(Segment::Index(1));
        assert_eq!(path.to_string(), "[0][1]");
    }
}
