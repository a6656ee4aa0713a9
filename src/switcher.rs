// SPDX-License-Identifier: MPL-2.0
//! Switch-control binding: active markers and dropdown sync.

use crate::page::{self, Document};

/// Refreshes the switch controls to reflect the current language: every
/// `data-lang` element gets the active class iff its code matches, and
/// the `lang-select` dropdown, when present, has its value synced.
///
/// Click and change handling lives on the engine (`click_switch`,
/// `select_change`); this pass only refreshes visual state, so it can
/// run after every switch.
pub fn bind_switch_controls(doc: &mut Document, current: &str) {
    doc.for_each_mut(|el| {
        let Some(code) = el.attr(page::ATTR_SWITCH).map(str::to_string) else {
            return;
        };
        if code == current {
            el.add_class(page::ACTIVE_CLASS);
        } else {
            el.remove_class(page::ACTIVE_CLASS);
        }
    });

    if let Some(select) = doc.element_by_id_mut(page::SELECT_ID) {
        select.set_attr("value", current);
    }
}
