mod node;

pub(crate) use node::{Link, Node};

#[cfg(test)]
pub(crate) use node::tests::validate;
