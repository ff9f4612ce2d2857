use std::cell::RefCell;
use std::rc::Rc;
use web_sys::Event;
use yew::prelude::*;
use yew_fast_tap::{TapOptions, use_fast_tap};

#[derive(Properties, PartialEq, Clone)]
pub struct TapPadProps {
    pub label: AttrValue,
    #[prop_or_default]
    pub hint: Option<AttrValue>,
    #[prop_or(0)]
    pub touch_delay: u32,
    #[prop_or(true)]
    pub cancel_on_move: bool,
    /// Shared switch read by `only_if` at touch begin and at fire time.
    #[prop_or_default]
    pub gate: Option<Rc<RefCell<bool>>>,
    pub on_tap: Callback<(String, String)>,
}

#[function_component(TapPad)]
pub fn tap_pad(props: &TapPadProps) -> Html {
    let node = use_node_ref();
    {
        let props = props.clone();
        use_fast_tap(node.clone(), move || {
            let label = props.label.to_string();
            let on_tap = props.on_tap.clone();
            let mut options = TapOptions::new()
                .touch_delay(props.touch_delay)
                .cancel_on_move(props.cancel_on_move)
                .callback(move |_, ev: &Event| on_tap.emit((label.clone(), ev.type_())));
            if let Some(gate) = props.gate.clone() {
                options = options.only_if(move |_| *gate.borrow());
            }
            options
        });
    }

    html! {<div style="display:flex; flex-direction:column; gap:4px;">
        <button ref={node} class="tap-pad" style="padding:14px 18px; font-size:16px; border-radius:8px; user-select:none;">
            { props.label.clone() }
        </button>
        { if let Some(h) = &props.hint { html!{<div style="font-size:11px; color:#8b949e;">{ h.clone() }</div>} } else { html!{} } }
    </div>}
}
