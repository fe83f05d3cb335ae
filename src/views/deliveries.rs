use crate::api::flash::Flash;
use crate::engine::deliveries::Dashboard;
use crate::models::delivery::{Delivery, DeliveryStatus};
use crate::models::driver::Driver;
use crate::views::{escape, layout, timestamp};

pub fn dashboard(board: &Dashboard, flashes: &[Flash]) -> String {
    let rows: String = board
        .deliveries
        .iter()
        .map(|d| {
            format!(
                r#"<tr><td><a href="/deliveries/{id}">{order}</a></td><td>{customer}</td><td>{address}</td><td class="status">{status}</td><td>{driver}</td><td>{eta}</td><td>{updated}</td></tr>
"#,
                id = d.id,
                order = escape(&d.order_number),
                customer = escape(&d.customer_name),
                address = escape(&d.address),
                status = d.status,
                driver = escape(&d.driver_name),
                eta = escape(d.estimated_delivery.as_deref().unwrap_or("")),
                updated = timestamp(&d.updated_at),
            )
        })
        .collect();

    let deliveries = if board.deliveries.is_empty() {
        "<p>No deliveries yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Order</th><th>Customer</th><th>Address</th><th>Status</th><th>Driver</th><th>Estimated</th><th>Updated</th></tr>\n{rows}</table>"
        )
    };

    let feed: String = board
        .notifications
        .iter()
        .map(|n| {
            format!(
                r#"<li class="{class}">{message} <small>{at}</small></li>
"#,
                class = if n.is_read { "read" } else { "unread" },
                message = escape(&n.message),
                at = timestamp(&n.created_at),
            )
        })
        .collect();

    let body = format!(
        r#"<section>
<h2>Deliveries</h2>
{deliveries}
</section>
<section>
<h2>Notifications ({unread} unread)</h2>
<form method="post" action="/notifications/read"><button type="submit">Mark all as read</button></form>
<ul class="notifications">
{feed}</ul>
</section>"#,
        unread = board.unread_notifications,
    );

    layout("Deliveries", flashes, &body)
}

pub fn new_delivery(drivers: &[Driver], flashes: &[Flash]) -> String {
    let options: String = drivers
        .iter()
        .map(|driver| {
            format!(
                r#"<option value="{}">{}</option>"#,
                driver.id,
                escape(&driver.name)
            )
        })
        .collect();

    let body = format!(
        r#"<form method="post" action="/deliveries/new">
<label>Order number <input name="order_number" required></label>
<label>Customer name <input name="customer_name" required></label>
<label>Address <input name="address" required></label>
<label>Estimated delivery <input type="date" name="estimated_delivery"></label>
<label>Driver <select name="driver_id"><option value="">Unassigned</option>{options}</select></label>
<button type="submit">Create delivery</button>
</form>"#
    );

    layout("New delivery", flashes, &body)
}

pub fn detail(delivery: &Delivery, flashes: &[Flash]) -> String {
    let options: String = DeliveryStatus::ALL
        .iter()
        .map(|status| {
            let selected = if *status == delivery.status {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{status}"{selected}>{status}</option>"#)
        })
        .collect();

    let driver = if delivery.driver_name.is_empty() {
        "Unassigned".to_string()
    } else {
        escape(&delivery.driver_name)
    };

    let body = format!(
        r#"<dl>
<dt>Order number</dt><dd>{order}</dd>
<dt>Customer</dt><dd>{customer}</dd>
<dt>Address</dt><dd>{address}</dd>
<dt>Status</dt><dd class="status">{status}</dd>
<dt>Driver</dt><dd>{driver}</dd>
<dt>Estimated delivery</dt><dd>{eta}</dd>
<dt>Last updated</dt><dd>{updated}</dd>
</dl>
<form method="post" action="/deliveries/{id}/status">
<select name="status">{options}</select>
<button type="submit">Update status</button>
</form>"#,
        id = delivery.id,
        order = escape(&delivery.order_number),
        customer = escape(&delivery.customer_name),
        address = escape(&delivery.address),
        status = delivery.status,
        eta = escape(delivery.estimated_delivery.as_deref().unwrap_or("-")),
        updated = timestamp(&delivery.updated_at),
    );

    layout(&format!("Delivery {}", delivery.order_number), flashes, &body)
}
