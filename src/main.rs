use leptos::prelude::*;

use logicbench::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(|| view! { <App /> })
}
