use web_sys::{Element, Event};
use yew::prelude::*;

use crate::dom::TapBinding;
use crate::model::{TapOptions, TouchSupport};

/// Bind tap handling to the element behind `node` once it is mounted. The
/// listeners are removed when the component unmounts.
///
/// `make_options` runs once, so closures inside it should read state through
/// `use_mut_ref` cells or dispatch to reducers rather than capture values.
#[hook]
pub fn use_fast_tap<F>(node: NodeRef, make_options: F)
where
    F: FnOnce() -> TapOptions<Element, Event> + 'static,
{
    use_effect_with(node, move |node| {
        let binding = node.cast::<Element>().and_then(|el| {
            TapBinding::attach(vec![el], None, make_options(), TouchSupport::current())
                .map_err(|e| log::warn!("use_fast_tap: {:?}", e))
                .ok()
        });
        if binding.is_none() {
            log::debug!("use_fast_tap: node not mounted, nothing bound");
        }
        move || drop(binding)
    });
}
