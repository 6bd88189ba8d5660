use dioxus::prelude::*;
use shared_types::{parse_input_date, DateRange};

/// Scratch page for the date-range picker.
#[component]
pub fn Playground() -> Element {
    let mut range = use_signal(|| None::<DateRange>);

    let set_start = move |evt: FormEvent| {
        let Some(day) = parse_input_date(&evt.value()) else {
            return;
        };
        let next = match *range.read() {
            Some(current) => current.with_start(day),
            None => DateRange::single(day),
        };
        range.set(Some(next));
    };

    let set_end = move |evt: FormEvent| {
        let Some(day) = parse_input_date(&evt.value()) else {
            return;
        };
        let next = match *range.read() {
            Some(current) => current.with_end(day),
            None => DateRange::single(day),
        };
        range.set(Some(next));
    };

    let selected = *range.read();

    rsx! {
        div { class: "container",
            h1 { "Playground" }
            div { class: "card",
                h3 { "Date range" }
                div { class: "form-group",
                    label { r#for: "range-start", "From" }
                    input {
                        id: "range-start",
                        r#type: "date",
                        value: selected.map(|r| r.start().to_string()).unwrap_or_default(),
                        onchange: set_start,
                    }
                }
                div { class: "form-group",
                    label { r#for: "range-end", "To" }
                    input {
                        id: "range-end",
                        r#type: "date",
                        value: selected.map(|r| r.end().to_string()).unwrap_or_default(),
                        onchange: set_end,
                    }
                }
                if let Some(r) = selected {
                    p { "{r.start()} to {r.end()} ({r.days()} days)" }
                    button { onclick: move |_| range.set(None), "Clear" }
                } else {
                    p { class: "muted", "Pick a start or end date." }
                }
            }
        }
    }
}
