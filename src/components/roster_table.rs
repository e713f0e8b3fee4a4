//! Roster Table Component
//!
//! Editable list of the problems attached to a contest. Order and points
//! inputs commit on change; rejected values show a warning under the table,
//! leave the roster as it was, and the input snaps back to the last valid
//! value.

use leptos::prelude::*;
use tracing::debug;
use web_sys::HtmlInputElement;

use crate::error::FieldError;
use crate::models::Id;
use crate::roster::{Roster, RosterItem};

#[component]
pub fn RosterTable(roster: RwSignal<Roster>) -> impl IntoView {
    let (warning, set_warning) = signal::<Option<String>>(None);

    let rows = move || {
        roster.with(|r| r.items().iter().cloned().enumerate().collect::<Vec<_>>())
    };

    view! {
        <div class="roster">
            <table class="roster-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        <th>"Problem"</th>
                        <th>"Points"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=rows
                        key=|(idx, item): &(usize, RosterItem)| (*idx, item.problem_id.clone(), item.order, item.points)
                        children=move |(idx, item): (usize, RosterItem)| {
                            let row_class = if item.is_new() { "roster-row new" } else { "roster-row" };
                            let order_id = item.problem_id.clone();
                            let points_id = item.problem_id.clone();
                            let points_title = item.title.clone();
                            let up_id = item.problem_id.clone();
                            let down_id = item.problem_id.clone();
                            let remove_id = item.problem_id.clone();
                            let order_title = item.title.clone();
                            view! {
                                <tr class=row_class>
                                    <td>
                                        <input
                                            type="number"
                                            min="1"
                                            class="order-input"
                                            prop:value=item.order.to_string()
                                            on:change=move |ev| {
                                                let raw = event_target_value(&ev);
                                                if let Some(shown) = apply_edit(roster, set_warning, Column::Order, &order_id, &order_title, &raw) {
                                                    event_target::<HtmlInputElement>(&ev).set_value(&shown);
                                                }
                                            }
                                        />
                                    </td>
                                    <td class="roster-title">{item.title.clone()}</td>
                                    <td>
                                        <input
                                            type="number"
                                            min="0"
                                            class="points-input"
                                            prop:value=item.points.to_string()
                                            on:change=move |ev| {
                                                let raw = event_target_value(&ev);
                                                if let Some(shown) = apply_edit(roster, set_warning, Column::Points, &points_id, &points_title, &raw) {
                                                    event_target::<HtmlInputElement>(&ev).set_value(&shown);
                                                }
                                            }
                                        />
                                    </td>
                                    <td class="roster-actions">
                                        <button
                                            type="button"
                                            title="Move up"
                                            disabled=move || idx == 0
                                            on:click=move |_| move_item(roster, &up_id, Roster::move_up)
                                        >
                                            "↑"
                                        </button>
                                        <button
                                            type="button"
                                            title="Move down"
                                            disabled=move || idx + 1 >= roster.with(Roster::len)
                                            on:click=move |_| move_item(roster, &down_id, Roster::move_down)
                                        >
                                            "↓"
                                        </button>
                                        <button
                                            type="button"
                                            class="remove-btn"
                                            on:click=move |_| {
                                                roster.maybe_update(|r| r.remove_item(&remove_id));
                                                set_warning.set(None);
                                            }
                                        >
                                            "Remove"
                                        </button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
                <tfoot>
                    <tr>
                        <td colspan="2">{move || format!("{} problems", roster.with(Roster::len))}</td>
                        <td>{move || roster.with(Roster::total_points)}</td>
                        <td></td>
                    </tr>
                </tfoot>
            </table>
            <Show when=move || roster.with(Roster::is_empty)>
                <p class="roster-empty">"No problems yet. Add some from the list below."</p>
            </Show>
            {move || warning.get().map(|w| view! { <p class="field-warning">{w}</p> })}
        </div>
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Column {
    Order,
    Points,
}

impl Column {
    fn label(self) -> &'static str {
        match self {
            Column::Order => "Order",
            Column::Points => "Points",
        }
    }

    fn commit(self, roster: &mut Roster, problem_id: &Id, raw: &str) -> Result<(), FieldError> {
        match self {
            Column::Order => roster.set_order(problem_id, raw),
            Column::Points => roster.set_points(problem_id, raw),
        }
    }

    /// Current committed value as input text
    fn shown(self, roster: &Roster, problem_id: &Id) -> Option<String> {
        let item = roster.items().iter().find(|i| &i.problem_id == problem_id)?;
        Some(match self {
            Column::Order => item.order.to_string(),
            Column::Points => item.points.to_string(),
        })
    }
}

/// Apply a numeric edit. The roster is only notified when it changed; on
/// rejection returns the last valid value for the input to show again.
fn apply_edit(
    roster: RwSignal<Roster>,
    set_warning: WriteSignal<Option<String>>,
    column: Column,
    problem_id: &Id,
    title: &str,
    raw: &str,
) -> Option<String> {
    let mut failure = None;
    roster.maybe_update(|r| match column.commit(r, problem_id, raw) {
        Ok(()) => true,
        Err(e) => {
            failure = Some(e);
            false
        }
    });
    match failure {
        Some(e) => {
            debug!("[ROSTER] Rejected {} for {}: {}", column.label(), title, e);
            set_warning.set(Some(format!("{} for \"{}\": {}", column.label(), title, e)));
            roster.with_untracked(|r| column.shown(r, problem_id))
        }
        None => {
            set_warning.set(None);
            None
        }
    }
}

fn move_item(roster: RwSignal<Roster>, problem_id: &Id, step: fn(&mut Roster, &Id) -> bool) {
    roster.maybe_update(|r| step(r, problem_id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Problem;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        for id in ["p1", "p2"] {
            roster.add_item(&Problem {
                id: Id::from(id),
                title: id.to_string(),
                difficulty: String::new(),
                tags: vec![],
            });
        }
        roster
    }

    #[test]
    fn test_rejected_edit_shows_last_valid_value() {
        let mut roster = roster();
        let p2 = Id::from("p2");

        for raw in ["0", "-3", "two", ""] {
            assert!(Column::Order.commit(&mut roster, &p2, raw).is_err());
            assert_eq!(Column::Order.shown(&roster, &p2).as_deref(), Some("2"));
        }
        assert!(Column::Points.commit(&mut roster, &p2, "-1").is_err());
        assert_eq!(Column::Points.shown(&roster, &p2).as_deref(), Some("100"));
    }

    #[test]
    fn test_accepted_edit_shows_new_value() {
        let mut roster = roster();
        let p1 = Id::from("p1");

        Column::Points.commit(&mut roster, &p1, " 250 ").unwrap();
        assert_eq!(Column::Points.shown(&roster, &p1).as_deref(), Some("250"));
        Column::Order.commit(&mut roster, &p1, "5").unwrap();
        assert_eq!(Column::Order.shown(&roster, &p1).as_deref(), Some("5"));
        assert_eq!(Column::Order.shown(&roster, &Id::from("p9")), None);
    }
}
