//! Host tree access.
//!
//! The engine never owns nodes. It sees the host tree only through an
//! [`Adapter`], and node handles only need to be cloneable and comparable
//! for identity.

use std::borrow::Cow;

use super::value::Value;

/// Read-only view of a host tree with node handles of type `T`.
pub trait Adapter<T> {
    /// Attribute value, or `None` when the node has no such attribute.
    fn attribute<'a>(&'a self, node: &'a T, name: &str) -> Option<Value<'a>>;

    /// Node type name compared against a stage's name.
    fn name<'a>(&'a self, node: &'a T) -> Option<Cow<'a, str>>;

    /// Children in document order.
    fn children(&self, node: &T) -> Vec<T>;

    fn parent(&self, node: &T) -> Option<T>;
}

impl<T, A: Adapter<T> + ?Sized> Adapter<T> for &A {
    fn attribute<'a>(&'a self, node: &'a T, name: &str) -> Option<Value<'a>> {
        (**self).attribute(node, name)
    }

    fn name<'a>(&'a self, node: &'a T) -> Option<Cow<'a, str>> {
        (**self).name(node)
    }

    fn children(&self, node: &T) -> Vec<T> {
        (**self).children(node)
    }

    fn parent(&self, node: &T) -> Option<T> {
        (**self).parent(node)
    }
}

/// Adapter assembled from four closures.
///
/// Returned values may borrow from the node but not from the closures'
/// captured state; handles like `Rc<Node>` or `&Node` fit naturally.
pub struct FnAdapter<Attr, Name, Children, Parent> {
    attribute: Attr,
    name: Name,
    children: Children,
    parent: Parent,
}

impl<Attr, Name, Children, Parent> FnAdapter<Attr, Name, Children, Parent> {
    pub fn new<T>(attribute: Attr, name: Name, children: Children, parent: Parent) -> Self
    where
        Attr: for<'a> Fn(&'a T, &str) -> Option<Value<'a>>,
        Name: for<'a> Fn(&'a T) -> Option<Cow<'a, str>>,
        Children: Fn(&T) -> Vec<T>,
        Parent: Fn(&T) -> Option<T>,
    {
        Self {
            attribute,
            name,
            children,
            parent,
        }
    }
}

impl<T, Attr, Name, Children, Parent> Adapter<T> for FnAdapter<Attr, Name, Children, Parent>
where
    Attr: for<'a> Fn(&'a T, &str) -> Option<Value<'a>>,
    Name: for<'a> Fn(&'a T) -> Option<Cow<'a, str>>,
    Children: Fn(&T) -> Vec<T>,
    Parent: Fn(&T) -> Option<T>,
{
    fn attribute<'a>(&'a self, node: &'a T, name: &str) -> Option<Value<'a>> {
        (self.attribute)(node, name)
    }

    fn name<'a>(&'a self, node: &'a T) -> Option<Cow<'a, str>> {
        (self.name)(node)
    }

    fn children(&self, node: &T) -> Vec<T> {
        (self.children)(node)
    }

    fn parent(&self, node: &T) -> Option<T> {
        (self.parent)(node)
    }
}
