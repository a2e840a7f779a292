// ============================================================================
// ADD QUOTE FORM VIEW - Formulario construido dinámicamente
// ============================================================================
// Los valores escritos viven en AppState (draft_*) para sobrevivir a los
// re-renders que dispara el sync periódico.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};
use crate::dom::{ElementBuilder, append_child, add_class, on_click, on_input};
use crate::state::app_state::AppState;
use crate::viewmodels::{QuoteViewModel, SyncViewModel};

/// Renderizar formulario para agregar citas
pub fn render_add_quote_form(state: &AppState) -> Result<Element, JsValue> {
    let form = ElementBuilder::new("div")?
        .class("add-quote-form")
        .id("formContainer")?
        .build();

    let text_input = create_draft_input(
        state,
        "newQuoteText",
        "Enter a new quote",
        state.draft_text.clone(),
    )?;
    let category_input = create_draft_input(
        state,
        "newQuoteCategory",
        "Enter quote category",
        state.draft_category.clone(),
    )?;

    let add_btn = ElementBuilder::new("button")?
        .class("btn-add-quote")
        .text("Add Quote")
        .build();

    {
        let state_clone = state.clone();
        on_click(&add_btn, move |_| {
            let text = state_clone.draft_text.borrow().clone();
            let category = state_clone.draft_category.borrow().clone();
            if let Ok(quote) = QuoteViewModel::new().add_quote(&state_clone, &text, &category) {
                SyncViewModel::new().push_new_quote(quote);
            }
        })?;
    }

    append_child(&form, &text_input)?;
    append_child(&form, &category_input)?;
    append_child(&form, &add_btn)?;

    if let Some(feedback) = state.feedback() {
        let message = ElementBuilder::new("p")?
            .class("form-feedback")
            .attr("role", "alert")?
            .text(&feedback.message)
            .build();
        if feedback.is_error {
            add_class(&message, "form-feedback--error")?;
        }
        append_child(&form, &message)?;
    }

    Ok(form)
}

/// Input de texto enlazado a un draft del estado.
/// Solo re-renderiza en la primera tecla tras un feedback, para ocultarlo.
fn create_draft_input(
    state: &AppState,
    id: &str,
    placeholder: &str,
    draft: Rc<RefCell<String>>,
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", "text")?
        .attr("placeholder", placeholder)?
        .build();

    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
        html_input.set_value(&draft.borrow());
    }

    let state_clone = state.clone();
    on_input(&input, move |e: web_sys::Event| {
        if let Some(target) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            *draft.borrow_mut() = target.value();
        }
        if state_clone.clear_feedback() {
            state_clone.notify_subscribers();
        }
    })?;

    Ok(input)
}
