//! Order board with per-row status selector.

use std::str::FromStr;

use crate::api::use_api;
use crate::components::icons::RefreshCw;
use crate::components::notice::use_notifier;
use furnish_shared::{OrderBoard, OrderStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlSelectElement;

fn status_badge(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "badge badge-warning",
        OrderStatus::Approved => "badge badge-info",
        OrderStatus::Shipped => "badge badge-primary",
        OrderStatus::Delivered => "badge badge-success",
        OrderStatus::Cancelled => "badge badge-error",
    }
}

#[component]
pub fn OrdersPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();

    let board = RwSignal::new(OrderBoard::default());
    let (loading, set_loading) = signal(true);

    let load_orders = move || {
        let db = api().database();
        set_loading.set(true);
        spawn_local(async move {
            match OrderBoard::load(&db).await {
                Ok(loaded) => board.set(loaded),
                Err(e) => notifier.failure("Orders", &e),
            }
            set_loading.set(false);
        });
    };

    load_orders();

    // 下拉框回退到 `current`，失败时行不会重绘
    let change_status = move |select: HtmlSelectElement, id: String, current: OrderStatus| {
        let status = match OrderStatus::from_str(&select.value()) {
            Ok(status) => status,
            Err(e) => {
                log::warn!("[Orders] {}", e);
                select.set_value(current.as_str());
                return;
            }
        };
        let change = match board.with_untracked(|b| b.prepare_status(&id, status)) {
            Ok(change) => change,
            Err(e) => {
                select.set_value(current.as_str());
                notifier.failure("Orders", &e);
                return;
            }
        };
        let db = api().database();
        spawn_local(async move {
            match change.send(&db).await {
                Ok(change) => {
                    board.update(|b| {
                        b.apply(&change);
                    });
                    notifier.success(format!("Order {} is now {}", change.id, change.status));
                }
                Err(e) => {
                    select.set_value(current.as_str());
                    notifier.failure("Orders", &e);
                }
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0">
                <div class="flex items-center justify-between p-6 pb-2">
                    <h3 class="card-title">"Orders"</h3>
                    <button on:click=move |_| load_orders() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                        <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>
                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Order"</th>
                                <th>"Customer"</th>
                                <th>"Status"</th>
                                <th>"Change"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || !loading.get() && board.with(|b| b.orders().is_empty())>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">"No orders."</td>
                                </tr>
                            </Show>
                            <For
                                each=move || board.with(|b| b.orders().to_vec())
                                key=|order| (order.id.clone(), order.status)
                                children=move |order| {
                                    let id = order.id.clone();
                                    let current = order.status;
                                    view! {
                                        <tr>
                                            <td class="font-mono text-sm">{order.id.clone()}</td>
                                            <td>{order.customer.clone()}</td>
                                            <td><span class={status_badge(order.status)}>{order.status.as_str()}</span></td>
                                            <td>
                                                <select
                                                    class="select select-bordered select-sm"
                                                    on:change=move |ev| change_status(event_target::<HtmlSelectElement>(&ev), id.clone(), current)
                                                >
                                                    {OrderStatus::ALL
                                                        .into_iter()
                                                        .map(|status| view! {
                                                            <option value={status.as_str()} selected={status == order.status}>
                                                                {status.as_str()}
                                                            </option>
                                                        })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
