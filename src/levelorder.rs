use genawaiter::rc::gen;
use genawaiter::yield_;

use std::collections::VecDeque;

use crate::xmlvalue::{Content, Element};

// traverse the forest under `roots` in level order, yielding each element
// together with its parent (None for the roots). Children of an element are
// only queued once the consumer asks for the next node after it.
pub(crate) fn level_order_traverse(
    roots: &Content,
) -> impl Iterator<Item = (Option<&Element>, &Element)> + '_ {
    gen!({
        let mut queue: VecDeque<(Option<&Element>, &Element)> = VecDeque::new();
        for root in roots.elements() {
            queue.push_back((None, root));
        }
        while let Some((parent, element)) = queue.pop_front() {
            yield_!((parent, element));
            for child in element.elements() {
                queue.push_back((Some(element), child));
            }
        }
    })
    .into_iter()
}
