// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A site navigation with two dropdowns driven by scripted input.
//!
//! - "Products" opens on click.
//! - "Help" opens on hover or when its toggle receives focus.
//!
//! Every host and dropdown decision is logged at debug level.
//!
//! Run:
//! - `cargo run -p understory_examples --example dropdown_menu`

use kurbo::Point;
use simplelog::{Config, LevelFilter, SimpleLogger};
use understory_dom::{Element, NodeId};
use understory_dropdown::{
    Dropdown, DropdownDetail, DropdownOptions, HIDE_EVENT, SHOW_EVENT, Trigger,
};
use understory_responder::Dom;
use understory_responder::listeners::ListenerOptions;
use understory_responder::types::{EventKind, Key, PRIMARY_BUTTON};

/// Build `li.nav__item > [button.js-dropdown-toggle, ul.js-dropdown-menu > li > a * n]`.
fn nav_item(dom: &mut Dom, nav: NodeId, links: usize) -> (NodeId, NodeId, Vec<NodeId>) {
    let item = dom.insert(Some(nav), Element::new("li").with_class("nav__item"));
    let toggle = dom.insert(
        Some(item),
        Element::new("button")
            .with_class("js-dropdown-toggle")
            .focusable(),
    );
    let menu = dom.insert(Some(item), Element::new("ul").with_class("js-dropdown-menu"));
    let anchors = (0..links)
        .map(|_| {
            let li = dom.insert(Some(menu), Element::new("li"));
            dom.insert(Some(li), Element::new("a").focusable())
        })
        .collect();
    (item, toggle, anchors)
}

fn report(dom: &Dom, name: &str, dropdown: &Dropdown) {
    println!(
        "{name:>8}: hidden={} aria-hidden={:?} focus={:?}",
        dropdown.is_hidden(),
        dom.document().attribute(dropdown.menu_element(), "aria-hidden"),
        dom.focused(),
    );
}

fn main() {
    SimpleLogger::init(LevelFilter::Debug, Config::default()).ok();

    let mut dom = Dom::new();
    let body = dom.insert(None, Element::new("body"));
    let nav = dom.insert(Some(body), Element::new("ul").with_class("nav"));
    let search = dom.insert(Some(body), Element::new("input").focusable());

    let (products_item, products_toggle, products_links) = nav_item(&mut dom, nav, 3);
    let (help_item, help_toggle, _) = nav_item(&mut dom, nav, 2);

    let products = match Dropdown::new(&mut dom, products_item) {
        Ok(d) => d,
        Err(err) => {
            eprintln!("products dropdown: {err}");
            return;
        }
    };
    let help = match Dropdown::attach(
        &mut dom,
        help_item,
        DropdownOptions::default().trigger(Trigger::Hover),
    ) {
        Ok(d) => d,
        Err(err) => {
            eprintln!("help dropdown: {err}");
            return;
        }
    };

    // Page-level analytics listening to the bubbling custom events.
    for name in [SHOW_EVENT, HIDE_EVENT] {
        dom.add_listener(
            body,
            EventKind::custom(name),
            ListenerOptions::BUBBLE,
            |_, ev| {
                if let Some(detail) = ev.detail::<DropdownDetail>() {
                    println!("  [analytics] {} menu={:?}", ev.kind.name(), detail.menu);
                }
            },
        );
    }
    products.subscribe(|ev| println!("  [products] {:?}", ev.kind));

    println!("-- click the products toggle");
    dom.pointer_down(products_toggle, PRIMARY_BUTTON, Point::new(12.0, 8.0), 0);
    dom.pointer_up(products_toggle, PRIMARY_BUTTON, Point::new(12.0, 9.0), 60);
    report(&dom, "products", &products);

    println!("-- tab into the menu, then press Escape");
    dom.focus(products_toggle);
    dom.focus(products_links[1]);
    report(&dom, "products", &products);
    dom.key_down(Key::Escape);
    report(&dom, "products", &products);

    println!("-- hover the help item, then move to the search box");
    dom.pointer_move(Some(help_toggle), Point::new(120.0, 8.0));
    report(&dom, "help", &help);
    dom.pointer_move(Some(search), Point::new(400.0, 8.0));
    report(&dom, "help", &help);

    println!("-- focus the help toggle, then tab out to the search box");
    dom.focus(help_toggle);
    report(&dom, "help", &help);
    dom.focus(search);
    report(&dom, "help", &help);

    products.destroy(&mut dom);
    help.destroy(&mut dom);
    println!("-- destroyed; {} page listener(s) remain", dom.listener_count());
}
