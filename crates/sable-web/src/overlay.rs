use sable_core::ScarePhase;
use web_sys as web;

use crate::constants::{MUTE_TOGGLE_ID, OVERLAY_ID};

/// Drive the blood-curtain overlay purely through a data attribute; the
/// cover/reveal animation itself lives in CSS.
pub fn set_scare_phase(document: &web::Document, phase: ScarePhase) {
    let value = match phase {
        ScarePhase::Idle => "idle",
        ScarePhase::Triggered => "triggered",
        ScarePhase::Covering => "covering",
        ScarePhase::FullyCovered => "covered",
        ScarePhase::Revealing => "revealing",
    };
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        let _ = el.set_attribute("data-phase", value);
    }
}

pub fn set_mute_indicator(document: &web::Document, muted: bool) {
    if let Some(el) = document.get_element_by_id(MUTE_TOGGLE_ID) {
        let list = el.class_list();
        let _ = if muted {
            list.add_1("muted")
        } else {
            list.remove_1("muted")
        };
    }
}
