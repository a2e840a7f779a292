// ============================================================================
// QUOTE DISPLAY VIEW - Región de la cita + controles de filtro
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlSelectElement};
use crate::dom::{ElementBuilder, append_child, add_class, set_attribute, on_click, on_change};
use crate::state::app_state::{AppState, QuoteDisplay};
use crate::viewmodels::QuoteViewModel;

/// Renderizar la cita actual
pub fn render_quote_display(state: &AppState) -> Result<Element, JsValue> {
    let display = ElementBuilder::new("div")?
        .class("quote-display")
        .id("quoteDisplay")?
        .text(&state.display_text())
        .build();

    if matches!(*state.display.borrow(), QuoteDisplay::NoQuotes) {
        add_class(&display, "quote-display--empty")?;
    }

    Ok(display)
}

/// Selector de categoría + botón "Show New Quote"
pub fn render_quote_controls(state: &AppState) -> Result<Element, JsValue> {
    let controls = ElementBuilder::new("div")?
        .class("quote-controls")
        .build();

    let select = ElementBuilder::new("select")?
        .class("category-filter")
        .id("categoryFilter")?
        .build();

    let selected = state.selected_category();
    let categories = state.store.borrow().categories();
    for category in &categories {
        let option = ElementBuilder::new("option")?
            .attr("value", &category.value())?
            .text(category.label())
            .build();
        if *category == selected {
            set_attribute(&option, "selected", "selected")?;
        }
        append_child(&select, &option)?;
    }

    {
        let state_clone = state.clone();
        on_change(&select, move |e: web_sys::Event| {
            if let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) {
                QuoteViewModel::new().apply_filter(&state_clone, &select.value());
            }
        })?;
    }

    let new_quote_btn = ElementBuilder::new("button")?
        .class("btn-new-quote")
        .id("newQuote")?
        .text("Show New Quote")
        .build();

    {
        let state_clone = state.clone();
        on_click(&new_quote_btn, move |_| {
            QuoteViewModel::new().show_random_quote(&state_clone);
        })?;
    }

    append_child(&controls, &select)?;
    append_child(&controls, &new_quote_btn)?;

    Ok(controls)
}
