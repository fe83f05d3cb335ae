use crate::api::flash::Flash;
use crate::models::driver::Driver;
use crate::views::{escape, layout};

pub fn list(drivers: &[Driver], flashes: &[Flash]) -> String {
    let rows: String = drivers
        .iter()
        .map(|driver| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&driver.name),
                escape(driver.phone.as_deref().unwrap_or(""))
            )
        })
        .collect();

    let body = format!(
        r#"<table>
<tr><th>Name</th><th>Phone</th></tr>
{rows}</table>
<h2>Add driver</h2>
<form method="post" action="/drivers/new">
<label>Name <input name="name" required></label>
<label>Phone <input name="phone"></label>
<button type="submit">Add driver</button>
</form>"#
    );

    layout("Drivers", flashes, &body)
}
