use std::rc::Rc;
use yew::prelude::*;

use crate::util::{format_elapsed, now_ms};

const MAX_ENTRIES: usize = 12;

#[derive(Clone, Debug, PartialEq)]
pub struct TapEntry {
    pub source: String,
    pub detail: String,
    pub at_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TapLog {
    pub started_ms: f64,
    pub total: u32,
    pub entries: Vec<TapEntry>,
}

impl Default for TapLog {
    fn default() -> Self {
        Self {
            started_ms: now_ms(),
            total: 0,
            entries: Vec::new(),
        }
    }
}

pub enum TapLogAction {
    Record { source: String, detail: String },
    Clear,
}

impl Reducible for TapLog {
    type Action = TapLogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TapLogAction::Record { source, detail } => {
                next.total += 1;
                next.entries.insert(
                    0,
                    TapEntry {
                        source,
                        detail,
                        at_ms: now_ms(),
                    },
                );
                next.entries.truncate(MAX_ENTRIES);
            }
            TapLogAction::Clear => {
                next.total = 0;
                next.entries.clear();
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TapLogPanelProps {
    pub log: UseReducerHandle<TapLog>,
}

#[function_component(TapLogPanel)]
pub fn tap_log_panel(props: &TapLogPanelProps) -> Html {
    let clear_cb = {
        let log = props.log.clone();
        Callback::from(move |_| log.dispatch(TapLogAction::Clear))
    };
    let started = props.log.started_ms;
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:240px;">
        <div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:6px;">
            <span style="font-weight:600;">{ format!("Taps: {}", props.log.total) }</span>
            <button onclick={clear_cb} style="padding:2px 8px; font-size:12px;">{"Clear"}</button>
        </div>
        { if props.log.entries.is_empty() { html!{<div style="font-size:12px; color:#8b949e;">{"Nothing tapped yet."}</div>} } else { html!{} } }
        { for props.log.entries.iter().map(|e| html!{
            <div style="display:flex; gap:8px; font-size:12px; line-height:1.5;">
                <span style="color:#8b949e; min-width:64px;">{ format_elapsed(started, e.at_ms) }</span>
                <span style="font-weight:600;">{ e.source.clone() }</span>
                <span style="opacity:0.8;">{ e.detail.clone() }</span>
            </div>
        }) }
    </div>}
}
