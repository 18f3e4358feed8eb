//! Navigation Demo
//!
//! A headless walk through the navigation API:
//! - push two pages with the iOS transition strategy
//! - pop back, then replace the stack with a new root
//! - lifecycle hooks logging each phase
//!
//! Run with: cargo run -p swish_router --example navigation_demo

use std::sync::Arc;

use swish_animation::InstantDriver;
use swish_core::{sync_hook, ElementHandle, LifecycleHooks, PageOptions, PageState, Region};
use swish_platform::Platform;
use swish_router::{ConfigPatch, TransitionConfig, TransitionController};

fn page(tag: &str, id: &str) -> PageState {
    let root = ElementHandle::new(tag);
    root.append_child(ElementHandle::new("header").with_region(Region::Header));
    root.append_child(ElementHandle::new("content").with_region(Region::Content));
    PageState::create(root, PageOptions::new().with_id(id))
}

fn hooks(name: &'static str) -> LifecycleHooks {
    LifecycleHooks::new()
        .on_will_enter(sync_hook(move |event| {
            println!("{name}: will enter ({})", event.direction);
        }))
        .on_did_enter(sync_hook(move |event| {
            println!("{name}: did enter ({})", event.direction);
        }))
        .on_did_leave(sync_hook(move |event| {
            println!("{name}: did leave ({})", event.direction);
        }))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    let controller = TransitionController::new().with_driver(Arc::new(InstantDriver));
    controller.configure(ConfigPatch::new().platform(Platform::Ios));

    for (tag, id) in [("home", "home"), ("detail", "detail")] {
        let page = page(tag, id);
        controller.register_lifecycle(page.id.clone(), hooks(tag));
        let result = controller.navigate_state(page, TransitionConfig::new()).await;
        println!("pushed {id}: success={} in {:?}", result.success, result.elapsed);
    }

    let result = controller.pop(TransitionConfig::new()).await;
    println!("popped: success={}", result.success);

    let result = controller
        .set_root(ElementHandle::new("login"), TransitionConfig::new())
        .await;
    println!(
        "new root: success={}, stack depth {}",
        result.success,
        controller.stack_len()
    );
}
