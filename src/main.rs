use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::prelude::*;

mod charts;
mod markdown;
mod models;

use models::{
    collect_payload, seed_rows, AnalysisResult, AnalyzePayload, Prices, RowDraft, CATEGORY_OPTIONS,
};

// The backend serves this app from its own origin.
const API_BASE_URL: &str = "";

/// What the advice area currently shows. Transitions only happen on
/// user-triggered analyze calls.
#[derive(Clone, PartialEq)]
enum AdvicePane {
    Idle,
    Working,
    /// Sanitized HTML ready for injection.
    Advice(String),
    Notice(&'static str),
    Error(String),
}

async fn request_analysis(payload: &AnalyzePayload) -> Result<AnalysisResult, String> {
    let url = format!("{}/analyze", API_BASE_URL);
    let response = Request::post(&url)
        .header("Content-Type", "application/json")
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.ok() {
        // The backend puts the failure reason in the body; surface it verbatim.
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| format!("HTTP {}", response.status()));
        return Err(body);
    }

    response
        .json::<AnalysisResult>()
        .await
        .map_err(|e| e.to_string())
}

#[derive(Properties, PartialEq)]
struct ExpenseRowProps {
    row: RowDraft,
    on_change: Callback<RowDraft>,
    on_remove: Callback<usize>,
}

#[function_component(ExpenseRowEditor)]
fn expense_row_editor(props: &ExpenseRowProps) -> Html {
    let on_name = {
        let row = props.row.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(RowDraft {
                    name: input.value(),
                    ..row.clone()
                });
            }
        })
    };

    let on_amount = {
        let row = props.row.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                on_change.emit(RowDraft {
                    amount: input.value(),
                    ..row.clone()
                });
            }
        })
    };

    let on_category = {
        let row = props.row.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            if let Some(select) = e.target_dyn_into::<HtmlSelectElement>() {
                on_change.emit(RowDraft {
                    category: select.value(),
                    ..row.clone()
                });
            }
        })
    };

    let on_remove = {
        let id = props.row.id;
        let on_remove = props.on_remove.clone();
        Callback::from(move |_| on_remove.emit(id))
    };

    html! {
        <div class="expense-row">
            <input
                class="name"
                type="text"
                placeholder="Expense name (e.g., Rent)"
                value={props.row.name.clone()}
                oninput={on_name}
            />
            <input
                class="amount"
                type="number"
                min="0"
                placeholder="Amount"
                value={props.row.amount.clone()}
                oninput={on_amount}
            />
            <select class="category" onchange={on_category}>
                <option value="" selected={props.row.category.is_empty()}>{"Auto"}</option>
                { for CATEGORY_OPTIONS.iter().map(|category| html! {
                    <option value={*category} selected={props.row.category == *category}>{ *category }</option>
                }) }
            </select>
            <button class="btn remove" onclick={on_remove}>{"✕"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MarketSnapshotProps {
    prices: Prices,
}

#[function_component(MarketSnapshot)]
fn market_snapshot(props: &MarketSnapshotProps) -> Html {
    if props.prices.stocks.is_empty() && props.prices.crypto.is_empty() {
        return html! {};
    }

    let quote = |label: &String, price: &f64| {
        html! {
            <li>
                <span class="ticker">{ label.clone() }</span>
                <span class="quote">{ format!("{price:.2}") }</span>
            </li>
        }
    };

    html! {
        <div class="card market">
            <h3>{"Market snapshot"}</h3>
            <div class="market-columns">
                <ul>
                    { for props.prices.stocks.iter().map(|(label, price)| quote(label, price)) }
                </ul>
                <ul>
                    { for props.prices.crypto.iter().map(|(label, price)| quote(label, price)) }
                </ul>
            </div>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let income = use_state(String::new);
    let rows = use_state(seed_rows);
    let next_id = use_state(|| seed_rows().len());
    let pane = use_state(|| AdvicePane::Idle);
    let analysis = use_state(|| None::<AnalysisResult>);
    let service_down = use_state(|| false);

    let pie_ref = use_node_ref();
    let bar_ref = use_node_ref();

    // Probe the backend once on mount so an unreachable service shows up
    // before the first analyze.
    {
        let service_down = service_down.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    let url = format!("{}/health", API_BASE_URL);
                    match Request::get(&url).send().await {
                        Ok(resp) if resp.ok() => {}
                        _ => service_down.set(true),
                    }
                });
                || ()
            },
            (),
        );
    }

    // Redraw both charts whenever a new analysis lands. Each draw clears the
    // surface first, so the previous chart never leaks through.
    {
        let pie_ref = pie_ref.clone();
        let bar_ref = bar_ref.clone();
        use_effect_with_deps(
            move |analysis: &Option<AnalysisResult>| {
                if let Some(result) = analysis {
                    if let Some(canvas) = pie_ref.cast::<HtmlCanvasElement>() {
                        charts::draw_pie(&canvas, &result.categories);
                    }
                    if let Some(canvas) = bar_ref.cast::<HtmlCanvasElement>() {
                        charts::draw_bar(&canvas, &result.summary);
                    }
                }
                || ()
            },
            (*analysis).clone(),
        );
    }

    let on_income = {
        let income = income.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                income.set(input.value());
            }
        })
    };

    let on_add_row = {
        let rows = rows.clone();
        let next_id = next_id.clone();
        Callback::from(move |_| {
            let mut next = (*rows).clone();
            next.push(RowDraft::blank(*next_id));
            next_id.set(*next_id + 1);
            rows.set(next);
        })
    };

    let on_row_change = {
        let rows = rows.clone();
        Callback::from(move |updated: RowDraft| {
            let mut next = (*rows).clone();
            if let Some(slot) = next.iter_mut().find(|r| r.id == updated.id) {
                *slot = updated;
            }
            rows.set(next);
        })
    };

    let on_row_remove = {
        let rows = rows.clone();
        Callback::from(move |id: usize| {
            let next: Vec<RowDraft> = (*rows).iter().filter(|r| r.id != id).cloned().collect();
            rows.set(next);
        })
    };

    // Each click issues an independent request; if two are in flight, the
    // last response to arrive wins the advice area and the charts.
    let on_analyze = {
        let income = income.clone();
        let rows = rows.clone();
        let pane = pane.clone();
        let analysis = analysis.clone();
        Callback::from(move |_| {
            let payload = collect_payload(&income, &rows);
            pane.set(AdvicePane::Working);

            let pane = pane.clone();
            let analysis = analysis.clone();
            spawn_local(async move {
                match request_analysis(&payload).await {
                    Ok(result) => {
                        match result.advice.as_deref().filter(|a| !a.trim().is_empty()) {
                            Some(advice) => {
                                pane.set(AdvicePane::Advice(markdown::render_advice(advice)))
                            }
                            None => pane.set(AdvicePane::Notice("No advice returned.")),
                        }
                        analysis.set(Some(result));
                    }
                    // Failed requests leave the previous analysis (and the
                    // charts drawn from it) untouched.
                    Err(reason) => pane.set(AdvicePane::Error(reason)),
                }
            });
        })
    };

    let advice_view = match &*pane {
        AdvicePane::Idle => html! {
            <p class="hint">{"Enter your income and expenses, then press Analyze."}</p>
        },
        AdvicePane::Working => html! {
            <p class="hint">{"Crunching numbers and fetching live market data..."}</p>
        },
        AdvicePane::Notice(msg) => html! { <p class="hint">{ *msg }</p> },
        AdvicePane::Error(reason) => html! {
            <p class="error">{ format!("Error: {}", reason) }</p>
        },
        AdvicePane::Advice(rendered) => html! {
            <div class="advice-body">
                { Html::from_html_unchecked(AttrValue::from(rendered.clone())) }
            </div>
        },
    };

    html! {
        <main class="page">
            <header class="masthead">
                <h1>{"FinSight"}</h1>
                <p class="tagline">{"AI-powered personal finance advisor"}</p>
            </header>

            {
                if *service_down {
                    html! {
                        <div class="banner">
                            {"The analysis service is unreachable right now. You can still edit the form and retry."}
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <section class="card">
                <label class="income-label" for="income">{"Monthly income"}</label>
                <input
                    id="income"
                    class="income"
                    type="number"
                    min="0"
                    placeholder="e.g., 50000"
                    value={(*income).clone()}
                    oninput={on_income}
                />

                <h3>{"Expenses"}</h3>
                <div id="expenses">
                    { for rows.iter().map(|row| html! {
                        <ExpenseRowEditor
                            key={row.id}
                            row={row.clone()}
                            on_change={on_row_change.clone()}
                            on_remove={on_row_remove.clone()}
                        />
                    }) }
                </div>

                <div class="actions">
                    <button class="btn" onclick={on_add_row}>{"+ Add expense"}</button>
                    <button class="btn primary" onclick={on_analyze}>{"Analyze"}</button>
                </div>
            </section>

            <section class="card advice" id="advice">
                { advice_view }
            </section>

            <section class="charts">
                <div class="card">
                    <h3>{"Spending by category"}</h3>
                    <canvas ref={pie_ref} id="pieChart" width="420" height="240"></canvas>
                </div>
                <div class="card">
                    <h3>{"Income vs. plan"}</h3>
                    <canvas ref={bar_ref} id="barChart" width="420" height="240"></canvas>
                </div>
            </section>

            {
                if let Some(prices) = analysis.as_ref().and_then(|a| a.prices.clone()) {
                    html! { <MarketSnapshot prices={prices} /> }
                } else {
                    html! {}
                }
            }
        </main>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
