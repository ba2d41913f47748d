//! Replicas of the demo-site widgets.
//!
//! Each builder appends one widget to the document and wires the click
//! handlers that make it behave: the date picker re-renders its month view,
//! the pager swaps the product rows, the radio group echoes the choice and
//! the upload form reports the file it received.

use crate::calendar::{CalendarState, Month, TargetDate};
use crate::identifiers::NodeId;
use crate::pages::file_upload::file_name;

use super::{FixtureDom, FixtureNode, FixtureTree};

// ============================================================================
// Data
// ============================================================================

/// Rows of the paginated product table: ID, name, price.
pub const PRODUCTS: [(&str, &str, &str); 20] = [
    ("1", "Smartphone", "$10.99"),
    ("2", "Laptop", "$19.99"),
    ("3", "Tablet", "$5.99"),
    ("4", "Smartwatch", "$7.99"),
    ("5", "Wireless Earbuds", "$8.99"),
    ("6", "Bluetooth Speaker", "$9.99"),
    ("7", "Television", "$20.99"),
    ("8", "Action Camera", "$15.99"),
    ("9", "Gaming Console", "$5.99"),
    ("10", "Digital Camera", "$16.99"),
    ("11", "Smart Home Hub", "$20.99"),
    ("12", "Router", "$24.99"),
    ("13", "Portable Charger", "$30.99"),
    ("14", "Fitness Tracker", "$19.99"),
    ("15", "Desktop Computer", "$2.99"),
    ("16", "E-Reader", "$10.99"),
    ("17", "VR Headset", "$11.99"),
    ("18", "Streaming Device", "$13.99"),
    ("19", "Soundbar", "$16.99"),
    ("20", "Wireless Mouse 20", "$17.99"),
];

/// Products shown per page.
pub const PRODUCTS_PER_PAGE: usize = 5;

/// Rows of the static book table: name, author, subject, price.
pub const BOOKS: [[&str; 4]; 6] = [
    ["Learn Selenium", "Amit", "Selenium", "300"],
    ["Learn Java", "Mukesh", "Java", "500"],
    ["Learn JS", "Animesh", "Javascript", "300"],
    ["Master In Selenium", "Mukesh", "Selenium", "3000"],
    ["Master In Java", "Amod", "JAVA", "2000"],
    ["Master In JS", "Amit", "Javascript", "1000"],
];

/// Country list options: value, label.
pub const COUNTRIES: [(&str, &str); 10] = [
    ("usa", "United States"),
    ("canada", "Canada"),
    ("uk", "United Kingdom"),
    ("germany", "Germany"),
    ("france", "France"),
    ("australia", "Australia"),
    ("japan", "Japan"),
    ("china", "China"),
    ("brazil", "Brazil"),
    ("india", "India"),
];

/// Color list options: value, label.
pub const COLORS: [(&str, &str); 5] = [
    ("red", "Red"),
    ("blue", "Blue"),
    ("green", "Green"),
    ("yellow", "Yellow"),
    ("white", "White"),
];

// ============================================================================
// Shadow DOM
// ============================================================================

/// Appends the shadow DOM demo and returns the outer host.
///
/// ```text
/// div#HTML16
///   div#shadow_host
///     #shadow-root
///       span.info "Mobiles"
///       a "Blog"
///       input[type=text], input[type=checkbox], input[type=file]
///       div#nested_shadow_host
///         #shadow-root
///           div "Laptops"
/// ```
pub fn shadow_dom(dom: &FixtureDom) -> NodeId {
    dom.with_tree(|tree| {
        let section = tree.append_to_document(FixtureNode::new("div").with_id("HTML16"));
        let host = tree.append_child(&section, FixtureNode::new("div").with_id("shadow_host"));

        tree.append_to_shadow(&host, FixtureNode::new("span").with_class("info").with_text("Mobiles"));
        tree.append_to_shadow(
            &host,
            FixtureNode::new("a")
                .with_attr("href", "https://www.pavantestingtools.com/")
                .with_text("Blog"),
        );
        tree.append_to_shadow(&host, FixtureNode::new("input").with_attr("type", "text"));
        tree.append_to_shadow(&host, FixtureNode::new("input").with_attr("type", "checkbox"));
        tree.append_to_shadow(&host, FixtureNode::new("input").with_attr("type", "file"));

        let nested =
            tree.append_to_shadow(&host, FixtureNode::new("div").with_id("nested_shadow_host"));
        tree.append_to_shadow(&nested, FixtureNode::new("div").with_text("Laptops"));

        host
    })
}

// ============================================================================
// Date Picker
// ============================================================================

/// Appends a jQuery UI style date picker showing `start` and returns its
/// input. The popup stays hidden until the input is clicked.
pub fn date_picker(dom: &FixtureDom, start: CalendarState) -> NodeId {
    let parts = dom.with_tree(|tree| {
        let input = tree.append_to_document(
            FixtureNode::new("input")
                .with_id("datepicker")
                .with_attr("type", "text"),
        );
        let popup = tree.append_to_document(
            FixtureNode::new("div")
                .with_id("ui-datepicker-div")
                .with_class("ui-datepicker")
                .hidden(),
        );

        let header =
            tree.append_child(&popup, FixtureNode::new("div").with_class("ui-datepicker-header"));
        for (link_class, icon_class, label) in [
            ("ui-datepicker-prev", "ui-icon-circle-triangle-w", "Prev"),
            ("ui-datepicker-next", "ui-icon-circle-triangle-e", "Next"),
        ] {
            let link = tree.append_child(
                &header,
                FixtureNode::new("a").with_class(link_class).with_attr("title", label),
            );
            tree.append_child(
                &link,
                FixtureNode::new("span")
                    .with_class("ui-icon")
                    .with_class(icon_class)
                    .with_text(label),
            );
        }

        let title =
            tree.append_child(&header, FixtureNode::new("div").with_class("ui-datepicker-title"));
        let month = tree.append_child(&title, FixtureNode::new("span").with_class("ui-datepicker-month"));
        let year = tree.append_child(&title, FixtureNode::new("span").with_class("ui-datepicker-year"));

        let table = tree.append_child(
            &popup,
            FixtureNode::new("table").with_class("ui-datepicker-calendar"),
        );
        let head = tree.append_child(&table, FixtureNode::new("thead"));
        let head_row = tree.append_child(&head, FixtureNode::new("tr"));
        for weekday in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
            tree.append_child(&head_row, FixtureNode::new("th").with_text(weekday));
        }
        let body = tree.append_child(&table, FixtureNode::new("tbody"));

        let view = MonthView { month, year, body };
        view.render(tree, start);

        (input, popup, view)
    });

    let (input, popup, view) = parts;

    let shown = popup.clone();
    dom.on_click(&input, move |tree, _| tree.set_visible(&shown, true));

    let field = input.clone();
    let container = popup.clone();
    dom.on_click(&popup, move |tree, target| {
        let Some(state) = view.displayed(tree) else {
            return;
        };

        if tree.closest(target, |n| n.has_class("ui-datepicker-next")).is_some() {
            view.render(tree, state.next_month());
        } else if tree.closest(target, |n| n.has_class("ui-datepicker-prev")).is_some() {
            view.render(tree, state.previous_month());
        } else if let Some(link) = tree.closest(target, |n| n.has_class("ui-state-default")) {
            let picked = tree
                .text_content(&link)
                .trim()
                .parse::<u32>()
                .ok()
                .and_then(|day| TargetDate::new(state.month, day, state.year).ok());
            if let Some(date) = picked {
                tree.set_attr(&field, "value", date.formatted());
                tree.set_visible(&container, false);
            }
        }
    });

    input
}

/// Shows the date picker popup without clicking the input.
pub fn open_date_picker(tree: &mut FixtureTree, input: &NodeId) {
    if tree.node(input).is_none() {
        return;
    }
    if let Some(popup) = tree.element_by_id("ui-datepicker-div") {
        tree.set_visible(&popup, true);
    }
}

/// The nodes a month re-render touches.
#[derive(Debug, Clone)]
struct MonthView {
    month: NodeId,
    year: NodeId,
    body: NodeId,
}

impl MonthView {
    fn displayed(&self, tree: &FixtureTree) -> Option<CalendarState> {
        let month = tree.text_content(&self.month).parse::<Month>().ok()?;
        let year = tree.text_content(&self.year).trim().parse::<i32>().ok()?;
        Some(CalendarState::new(month, year))
    }

    fn render(&self, tree: &mut FixtureTree, state: CalendarState) {
        tree.set_text(&self.month, state.month.name());
        tree.set_text(&self.year, state.year.to_string());
        tree.remove_children(&self.body);

        let days = state.month.days_in(state.year);
        let lead = weekday(state.year, state.month, 1);
        let cells = (lead + days).div_ceil(7) * 7;

        let mut row = None;
        for cell in 0..cells {
            if cell % 7 == 0 {
                row = Some(tree.append_child(&self.body, FixtureNode::new("tr")));
            }
            let Some(row) = &row else {
                continue;
            };

            let day = cell + 1;
            match day.checked_sub(lead).filter(|d| (1..=days).contains(d)) {
                Some(day) => {
                    let td = tree.append_child(row, FixtureNode::new("td"));
                    tree.append_child(
                        &td,
                        FixtureNode::new("a")
                            .with_class("ui-state-default")
                            .with_attr("href", "#")
                            .with_text(day.to_string()),
                    );
                }
                None => {
                    tree.append_child(
                        row,
                        FixtureNode::new("td").with_class("ui-datepicker-other-month"),
                    );
                }
            }
        }
    }
}

/// Day of week (0 = Sunday).
fn weekday(year: i32, month: Month, day: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = i64::from(if month.number() < 3 { year - 1 } else { year });
    let offset = OFFSETS[month.number() as usize - 1];
    let dow = (y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400) + offset + i64::from(day))
        .rem_euclid(7);
    u32::try_from(dow).unwrap_or_default()
}

// ============================================================================
// Tables
// ============================================================================

/// Appends the paginated product table and its pager; returns the table.
///
/// Rows are `ID | Name | Price | <checkbox>`. Clicking a pager link renders
/// that page with fresh, unchecked rows.
pub fn pagination_table(dom: &FixtureDom) -> NodeId {
    let pages = PRODUCTS.len().div_ceil(PRODUCTS_PER_PAGE);

    let (table, body, pager, links) = dom.with_tree(|tree| {
        let table = tree.append_to_document(FixtureNode::new("table").with_id("productTable"));
        let head = tree.append_child(&table, FixtureNode::new("thead"));
        let head_row = tree.append_child(&head, FixtureNode::new("tr"));
        for title in ["ID", "Name", "Price", "Select"] {
            tree.append_child(&head_row, FixtureNode::new("th").with_text(title));
        }
        let body = tree.append_child(&table, FixtureNode::new("tbody"));
        render_products(tree, &body, 1);

        let pager = tree.append_to_document(FixtureNode::new("ul").with_id("pagination"));
        let links: Vec<NodeId> = (1..=pages)
            .map(|page| {
                let item = tree.append_child(&pager, FixtureNode::new("li"));
                tree.append_child(
                    &item,
                    FixtureNode::new("a")
                        .with_attr("href", "#")
                        .with_text(page.to_string()),
                )
            })
            .collect();
        mark_active(tree, &links, 1);

        (table, body, pager, links)
    });

    dom.on_click(&pager, move |tree, target| {
        let page = tree
            .closest(target, |n| n.tag == "a")
            .and_then(|link| tree.text_content(&link).trim().parse::<usize>().ok())
            .filter(|page| (1..=pages).contains(page));
        if let Some(page) = page {
            render_products(tree, &body, page);
            mark_active(tree, &links, page);
        }
    });

    table
}

fn render_products(tree: &mut FixtureTree, body: &NodeId, page: usize) {
    tree.remove_children(body);
    let rows = PRODUCTS
        .iter()
        .skip((page - 1) * PRODUCTS_PER_PAGE)
        .take(PRODUCTS_PER_PAGE);

    for (id, name, price) in rows {
        let row = tree.append_child(body, FixtureNode::new("tr"));
        for text in [id, name, price] {
            tree.append_child(&row, FixtureNode::new("td").with_text(*text));
        }
        let select = tree.append_child(&row, FixtureNode::new("td"));
        tree.append_child(&select, FixtureNode::new("input").with_attr("type", "checkbox"));
    }
}

fn mark_active(tree: &mut FixtureTree, links: &[NodeId], page: usize) {
    for (index, link) in links.iter().enumerate() {
        let class = if index + 1 == page { "active" } else { "" };
        tree.set_attr(link, "class", class);
    }
}

/// Appends the static book table; returns the table.
pub fn static_table(dom: &FixtureDom) -> NodeId {
    dom.with_tree(|tree| {
        let table = tree.append_to_document(FixtureNode::new("table").with_attr("name", "BookTable"));
        let body = tree.append_child(&table, FixtureNode::new("tbody"));

        let header = tree.append_child(&body, FixtureNode::new("tr"));
        for title in ["BookName", "Author", "Subject", "Price"] {
            tree.append_child(&header, FixtureNode::new("th").with_text(title));
        }
        for book in BOOKS {
            let row = tree.append_child(&body, FixtureNode::new("tr"));
            for cell in book {
                tree.append_child(&row, FixtureNode::new("td").with_text(cell));
            }
        }
        table
    })
}

// ============================================================================
// Form Controls
// ============================================================================

/// Appends `form#checkboxes` with two checkboxes, the second pre-checked.
pub fn checkboxes(dom: &FixtureDom) -> NodeId {
    dom.with_tree(|tree| {
        let form = tree.append_to_document(FixtureNode::new("form").with_id("checkboxes"));
        for (label, checked) in [("checkbox 1", false), ("checkbox 2", true)] {
            let input = FixtureNode::new("input").with_attr("type", "checkbox");
            tree.append_child(&form, if checked { input.checked() } else { input });
            tree.append_child(&form, FixtureNode::new("span").with_text(label));
        }
        form
    })
}

/// Appends the `like` radio group; "No" is disabled. Returns the container.
///
/// Choosing a radio renders `p.mt-3` reading "You have selected <label>".
pub fn radio_buttons(dom: &FixtureDom) -> NodeId {
    let container = dom.with_tree(|tree| {
        let container = tree.append_to_document(FixtureNode::new("div").with_id("radio-demo"));
        for (id, label, disabled) in [
            ("yesRadio", "Yes", false),
            ("impressiveRadio", "Impressive", false),
            ("noRadio", "No", true),
        ] {
            let input = FixtureNode::new("input")
                .with_id(id)
                .with_attr("type", "radio")
                .with_attr("name", "like")
                .with_attr("value", label);
            tree.append_child(&container, if disabled { input.disabled() } else { input });
            tree.append_child(
                &container,
                FixtureNode::new("label").with_attr("for", id).with_text(label),
            );
        }
        container
    });

    let owner = container.clone();
    dom.on_click(&container, move |tree, target| {
        let chosen = tree
            .node(target)
            .filter(|n| n.selected && n.attr("type") == Some("radio"))
            .and_then(|n| n.attr("value"))
            .map(str::to_string);
        let Some(label) = chosen else {
            return;
        };

        let existing = tree
            .children(&owner)
            .iter()
            .find(|child| tree.node(child).is_some_and(|n| n.tag == "p" && n.has_class("mt-3")))
            .cloned();
        let message = existing
            .unwrap_or_else(|| tree.append_child(&owner, FixtureNode::new("p").with_class("mt-3")));

        tree.remove_children(&message);
        tree.set_text(&message, "You have selected ");
        tree.append_child(
            &message,
            FixtureNode::new("span").with_class("text-success").with_text(label),
        );
    });

    container
}

/// Appends `select#country` and the multi-select `select#colors`.
///
/// The first country starts selected; no color does.
pub fn dropdowns(dom: &FixtureDom) -> (NodeId, NodeId) {
    dom.with_tree(|tree| {
        let form = tree.append_to_document(FixtureNode::new("div").with_class("form-group"));

        let country = tree.append_child(&form, FixtureNode::new("select").with_id("country"));
        for (index, (value, label)) in COUNTRIES.iter().enumerate() {
            let option = FixtureNode::new("option").with_attr("value", *value).with_text(*label);
            tree.append_child(&country, if index == 0 { option.checked() } else { option });
        }

        let colors = tree.append_child(
            &form,
            FixtureNode::new("select").with_id("colors").with_attr("multiple", ""),
        );
        for (value, label) in COLORS {
            tree.append_child(
                &colors,
                FixtureNode::new("option").with_attr("value", value).with_text(label),
            );
        }

        (country, colors)
    })
}

/// Appends the upload form. Submitting hides it and shows the
/// "File Uploaded!" heading with the received file name.
pub fn file_upload(dom: &FixtureDom) -> NodeId {
    let (form, input, submit) = dom.with_tree(|tree| {
        let form = tree.append_to_document(FixtureNode::new("form").with_id("upload-form"));
        let input = tree.append_child(
            &form,
            FixtureNode::new("input").with_id("file-upload").with_attr("type", "file"),
        );
        let submit = tree.append_child(
            &form,
            FixtureNode::new("input")
                .with_id("file-submit")
                .with_attr("type", "submit")
                .with_attr("value", "Upload"),
        );
        (form, input, submit)
    });

    let shown = form.clone();
    dom.on_click(&submit, move |tree, _| {
        let Some(path) = tree.node(&input).and_then(|n| n.attr("value")).map(str::to_string) else {
            return;
        };

        tree.set_visible(&shown, false);
        tree.append_to_document(FixtureNode::new("h3").with_text("File Uploaded!"));
        tree.append_to_document(
            FixtureNode::new("div")
                .with_id("uploaded-files")
                .with_text(file_name(&path)),
        );
    });

    form
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::driver::By;

    #[test]
    fn test_weekday() {
        assert_eq!(weekday(2026, Month::January, 1), 4);
        assert_eq!(weekday(2021, Month::March, 1), 1);
        assert_eq!(weekday(2000, Month::February, 29), 2);
    }

    #[tokio::test]
    async fn test_date_picker_renders_month() {
        let dom = FixtureDom::new();
        date_picker(&dom, CalendarState::new(Month::February, 2024));
        let ctx = dom.context();

        let days = ctx
            .find_all(By::css("table.ui-datepicker-calendar a.ui-state-default"))
            .await
            .expect("days");
        assert_eq!(days.len(), 29);

        let month = ctx.find(By::css("span.ui-datepicker-month")).await.expect("month");
        assert_eq!(month.text().await.expect("text"), "February");
    }

    #[tokio::test]
    async fn test_date_picker_opens_on_input_click() {
        let dom = FixtureDom::new();
        date_picker(&dom, CalendarState::new(Month::May, 2025));
        let ctx = dom.context();

        let popup = ctx.find(By::id("ui-datepicker-div")).await.expect("popup");
        assert!(!popup.is_visible().await.expect("visible"));

        ctx.find(By::id("datepicker")).await.expect("input").click().await.expect("click");
        assert!(popup.is_visible().await.expect("visible"));
    }

    #[tokio::test]
    async fn test_pager_swaps_rows() {
        let dom = FixtureDom::new();
        pagination_table(&dom);
        let ctx = dom.context();

        ctx.find(By::link_text("3")).await.expect("link").click().await.expect("click");

        let first = ctx
            .find(By::css("table#productTable tbody td"))
            .await
            .expect("cell");
        assert_eq!(first.text().await.expect("text"), "11");
    }

    #[tokio::test]
    async fn test_radio_choice_renders_confirmation() {
        let dom = FixtureDom::new();
        radio_buttons(&dom);
        let ctx = dom.context();

        assert!(ctx.try_find(By::css("p.mt-3")).await.expect("query").is_none());
        for (id, label) in [("yesRadio", "Yes"), ("impressiveRadio", "Impressive")] {
            ctx.find(By::id(id)).await.expect("radio").click().await.expect("click");
            let message = ctx.find(By::css("p.mt-3")).await.expect("message");
            assert_eq!(
                message.text().await.expect("text"),
                format!("You have selected {label}")
            );
        }
        assert_eq!(ctx.find_all(By::css("p.mt-3")).await.expect("all").len(), 1);
    }

    #[tokio::test]
    async fn test_upload_without_file_does_nothing() {
        let dom = FixtureDom::new();
        file_upload(&dom);
        let ctx = dom.context();

        ctx.find(By::id("file-submit")).await.expect("submit").click().await.expect("click");
        assert!(ctx.try_find(By::id("uploaded-files")).await.expect("query").is_none());
    }

    #[tokio::test]
    async fn test_shadow_dom_hides_inner_nodes() {
        let dom = FixtureDom::new();
        shadow_dom(&dom);

        let found = dom.context().try_find(By::css("span.info")).await.expect("query");
        assert!(found.is_none());
    }
}
