//! 通知提示框
//!
//! One toast at a time, auto-dismissed after a few seconds. Each notice gets
//! a sequence number so a stale timer never closes a newer message.

use furnish_shared::AdminError;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const NOTICE_TTL_MS: u32 = 3_000;

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

#[derive(Clone, Copy)]
pub struct Notifier {
    current: RwSignal<Option<(u64, Notice)>>,
    next_seq: StoredValue<u64>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_seq: StoredValue::new(0),
        }
    }

    fn show(&self, message: String, is_error: bool) {
        let seq = self.next_seq.get_value();
        self.next_seq.set_value(seq + 1);
        self.current.set(Some((seq, Notice { message, is_error })));

        let current = self.current;
        Timeout::new(NOTICE_TTL_MS, move || {
            if current.with_untracked(|n| n.as_ref().is_some_and(|(s, _)| *s == seq)) {
                current.set(None);
            }
        })
        .forget();
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), false);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message.into(), true);
    }

    /// Log the full trace and show the short, user-facing text.
    pub fn failure(&self, context: &str, err: &AdminError) {
        log::error!("[{}] {}", context, err);
        self.error(err.user_message());
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

#[component]
pub fn NoticeToast() -> impl IntoView {
    let notifier = use_notifier();

    move || {
        notifier.current.get().map(|(_, notice)| {
            let class = if notice.is_error {
                "alert alert-error shadow-lg"
            } else {
                "alert alert-success shadow-lg"
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div role="alert" class=class>
                        <span>{notice.message}</span>
                        <button class="btn btn-ghost btn-xs" on:click=move |_| notifier.dismiss()>
                            "✕"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
