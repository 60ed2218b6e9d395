use std::collections::VecDeque;

use crate::access::SearchProperty;
use crate::index::TrueIndex;
use crate::levelorder::level_order_traverse;
use crate::xmlvalue::{Content, Element};

/// The root of a parsed or constructed document.
///
/// It wraps a single [`Content`] holding the top-level items: usually one
/// document element with comments, directives and processing instructions
/// around it, but fragments with several root elements are fine too.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DocumentTree {
    pub(crate) root: Content,
}

impl DocumentTree {
    pub fn new<C: Into<Content>>(root: C) -> Self {
        DocumentTree { root: root.into() }
    }

    /// The top-level content.
    pub fn root(&self) -> &Content {
        &self.root
    }

    /// Mutable access to the top-level content.
    pub fn root_mut(&mut self) -> &mut Content {
        &mut self.root
    }

    /// Iterator over the top-level elements.
    pub fn root_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.root.elements()
    }

    /// The first top-level element.
    pub fn document_element(&self) -> Option<&Element> {
        self.root.elements().next()
    }

    /// Mutable access to the first top-level element.
    pub fn document_element_mut(&mut self) -> Option<&mut Element> {
        self.root.elements_mut().next()
    }

    /// Every element in level order, paired with its parent.
    ///
    /// Roots come first with no parent, then their children left to right,
    /// and so on down.
    pub fn level_order(&self) -> impl Iterator<Item = (Option<&Element>, &Element)> + '_ {
        level_order_traverse(&self.root)
    }

    /// Find the shallowest element with this tag and text value.
    ///
    /// Returns the parent (`None` for a root element) and the element.
    ///
    /// ```rust
    /// use xmledit::DocumentTree;
    ///
    /// let tree = DocumentTree::parse(
    ///     "<Ships><Ship><Name>Dart</Name></Ship><Name>Fleet</Name></Ships>",
    /// )?;
    /// let (parent, element) = tree.find("Name", "Dart").unwrap();
    /// assert_eq!(parent.unwrap().name(), "Ship");
    /// assert_eq!(element.value(), Some("Dart"));
    /// assert!(tree.find("Name", "Nothing").is_none());
    /// # Ok::<(), xmledit::Error>(())
    /// ```
    pub fn find(&self, tag: &str, value: &str) -> Option<(Option<&Element>, &Element)> {
        self.find_using(|element| element.matches(tag, value))
    }

    /// Find the shallowest element whose children match every property.
    pub fn find_element_with_all(&self, properties: &[SearchProperty]) -> Option<&Element> {
        self.find_using(|element| element.matches_all(properties))
            .map(|(_, element)| element)
    }

    /// Find the first element in level order that `finder` accepts.
    ///
    /// Shallower elements win; within a level the leftmost wins. Returns the
    /// parent (`None` for a root element) and the element.
    pub fn find_using<F>(&self, mut finder: F) -> Option<(Option<&Element>, &Element)>
    where
        F: FnMut(&Element) -> bool,
    {
        self.level_order().find(|(_, element)| finder(element))
    }

    /// Mutable version of [`DocumentTree::find`].
    pub fn find_mut(&mut self, tag: &str, value: &str) -> Option<&mut Element> {
        self.find_using_mut(|element| element.matches(tag, value))
    }

    /// Mutable version of [`DocumentTree::find_using`].
    ///
    /// The element is located in the same level order, then reached again
    /// through its path of true indexes.
    pub fn find_using_mut<F>(&mut self, finder: F) -> Option<&mut Element>
    where
        F: FnMut(&Element) -> bool,
    {
        let path = self.find_path_using(finder)?;
        self.element_at_path_mut(&path)
    }

    /// The path of true indexes, from the root content down, to the first
    /// element in level order that `finder` accepts.
    pub fn find_path_using<F>(&self, mut finder: F) -> Option<Vec<TrueIndex>>
    where
        F: FnMut(&Element) -> bool,
    {
        let mut queue: VecDeque<(Vec<TrueIndex>, &Element)> = self
            .root
            .elements_with_true_index()
            .map(|(index, element)| (vec![index], element))
            .collect();
        while let Some((path, element)) = queue.pop_front() {
            if finder(element) {
                return Some(path);
            }
            for (index, child) in element.elements_with_true_index() {
                let mut child_path = path.clone();
                child_path.push(index);
                queue.push_back((child_path, child));
            }
        }
        None
    }

    /// The element reached by following a path of true indexes.
    pub fn element_at_path(&self, path: &[TrueIndex]) -> Option<&Element> {
        let (first, rest) = path.split_first()?;
        let mut element = self.root.element_at_true_index(*first)?;
        for index in rest {
            element = element.content.element_at_true_index(*index)?;
        }
        Some(element)
    }

    /// Mutable access to the element reached by following a path of true
    /// indexes.
    pub fn element_at_path_mut(&mut self, path: &[TrueIndex]) -> Option<&mut Element> {
        let (first, rest) = path.split_first()?;
        let mut element = self.root.element_at_true_index_mut(*first)?;
        for index in rest {
            element = element.content.element_at_true_index_mut(*index)?;
        }
        Some(element)
    }
}

impl From<Element> for DocumentTree {
    fn from(element: Element) -> Self {
        DocumentTree::new(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xmlvalue::Item;

    // Root
    //   A (Name=Target, B (Name=Other))
    //   C (Name=Target)
    fn tree() -> DocumentTree {
        let b = Element::with_content("B", Element::with_value("Name", "Other"));
        let a = Element::with_content(
            "A",
            vec![
                Item::Element(Element::with_value("Name", "Target")),
                Item::Element(b),
            ],
        );
        let c = Element::with_content("C", Element::with_value("Name", "Target"));
        let root = Element::with_content(
            "Root",
            vec![Item::comment("top"), Item::Element(a), Item::Element(c)],
        );
        DocumentTree::new(vec![Item::directive("DOCTYPE Root"), Item::Element(root)])
    }

    #[test]
    fn test_find_shallowest_leftmost() {
        let tree = tree();
        let (parent, element) = tree.find("Name", "Target").unwrap();
        assert_eq!(parent.unwrap().name(), "A");
        assert_eq!(element.name(), "Name");
    }

    #[test]
    fn test_find_root_has_no_parent() {
        let tree = tree();
        let (parent, element) = tree.find_using(|e| e.is("Root")).unwrap();
        assert!(parent.is_none());
        assert_eq!(element.name(), "Root");
    }

    #[test]
    fn test_find_deeper() {
        let tree = tree();
        let (parent, _) = tree.find("Name", "Other").unwrap();
        assert_eq!(parent.unwrap().name(), "B");
    }

    #[test]
    fn test_find_element_with_all() {
        let tree = tree();
        let element = tree
            .find_element_with_all(&[SearchProperty::new("Name", "Target")])
            .unwrap();
        assert_eq!(element.name(), "A");
    }

    #[test]
    fn test_find_path_and_mut() {
        let mut tree = tree();
        let path = tree.find_path_using(|e| e.is("B")).unwrap();
        // directive, Root at 1; comment, A at 1; Name, B at 1
        assert_eq!(
            path,
            vec![TrueIndex::new(1), TrueIndex::new(1), TrueIndex::new(1)]
        );
        let b = tree.find_using_mut(|e| e.is("B")).unwrap();
        b.set_attribute("seen", "1");
        assert_eq!(
            tree.element_at_path(&path).unwrap().attribute("seen"),
            Some("1")
        );
    }

    #[test]
    fn test_find_mut_edits_in_place() {
        let mut tree = tree();
        tree.find_mut("Name", "Other").unwrap().set_value("Renamed");
        assert!(tree.find("Name", "Other").is_none());
        assert!(tree.find("Name", "Renamed").is_some());
    }

    #[test]
    fn test_find_in_empty_tree() {
        let tree = DocumentTree::default();
        assert!(tree.find_using(|_| true).is_none());
        assert!(tree.document_element().is_none());
    }
}
