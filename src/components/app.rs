use web_sys::{Element, Event};
use yew::prelude::*;
use yew_fast_tap::{TapOptions, TouchSupport, use_fast_tap};

use super::tap_log::{TapLog, TapLogAction, TapLogPanel};
use super::tap_pad::TapPad;

const TAP_STYLES: &str = "
.touch-started { outline: 2px solid #58a6ff; }
.touched { background: #1f6feb !important; color: #fff; }
a.test { color: #58a6ff; }
";

#[function_component(App)]
pub fn app() -> Html {
    let log = use_reducer(TapLog::default);
    let armed = use_state(|| false);
    // Read by only_if long after the closure was built, so not a plain copy.
    let armed_flag = use_mut_ref(|| false);
    let list_ref = use_node_ref();

    {
        let armed_flag = armed_flag.clone();
        use_effect_with(*armed, move |armed| {
            *armed_flag.borrow_mut() = *armed;
            || ()
        });
    }

    let on_tap = {
        let log = log.clone();
        Callback::from(move |(source, detail): (String, String)| {
            log.dispatch(TapLogAction::Record { source, detail });
        })
    };

    // Delegated: only `a.test` links inside the list count.
    {
        let log = log.clone();
        use_fast_tap(list_ref.clone(), move || {
            TapOptions::new()
                .selector("a.test")
                .touch_delay(150)
                .callback(move |el: &Element, ev: &Event| {
                    log.dispatch(TapLogAction::Record {
                        source: el.text_content().unwrap_or_default(),
                        detail: ev.type_(),
                    });
                })
        });
    }

    let toggle_armed = {
        let armed = armed.clone();
        Callback::from(move |_| armed.set(!*armed))
    };
    let support = match TouchSupport::current() {
        TouchSupport::Touch => "touch events",
        TouchSupport::NoTouch => "clicks (no touch support)",
    };

    html! {<div id="root" style="display:flex; flex-wrap:wrap; gap:16px; padding:16px; color:#c9d1d9; background:#0d1117; min-height:100vh; font-family:sans-serif;">
        <style>{ TAP_STYLES }</style>
        <div style="display:flex; flex-direction:column; gap:14px; min-width:260px;">
            <h2 style="margin:0;">{"Fast tap"}</h2>
            <div style="font-size:12px; color:#8b949e;">{ format!("Listening for {}", support) }</div>
            <TapPad label="Tap" hint="fires on release" on_tap={on_tap.clone()} />
            <TapPad label="Hold" hint="touched after 150 ms" touch_delay={150} on_tap={on_tap.clone()} />
            <TapPad label="Drag-friendly" hint="moving does not cancel" cancel_on_move={false} on_tap={on_tap.clone()} />
            <div style="display:flex; flex-direction:column; gap:6px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={*armed} onclick={toggle_armed} />
                    <span>{"Armed"}</span>
                </label>
                <TapPad label="Gated" hint="only when armed" gate={Some(armed_flag.clone())} on_tap={on_tap.clone()} />
            </div>
            <ul ref={list_ref} style="margin:0; padding-left:18px; line-height:2;">
                <li><a class="test" href="#">{"First link"}</a></li>
                <li><a href="#">{"Ignored link"}</a></li>
                <li><a class="test" href="#"><span>{"Nested label"}</span></a></li>
                <li>{"Plain item"}</li>
            </ul>
        </div>
        <TapLogPanel log={log.clone()} />
    </div>}
}
