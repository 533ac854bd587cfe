//! Customer cart pages.

use askama::Template;
use axum::{
    extract::Query,
    response::{IntoResponse as _, Redirect, Response},
    Form,
};
use serde::Deserialize;
use service::{
    command::{AddToCart, RemoveCartItems},
    domain::{cart, diamond::CertificateNumber, CartItem},
    query, read, Command as _, Query as _,
};
use url::form_urlencoded;

use crate::{
    page::{FormError, Page, SPAN_NAME},
    view::{Cell, Column, Row, Selection, Table},
    AsError, Context, Error,
};

/// Path of the cart page.
pub const PATH: &str = "/cart";

/// Query parameter carrying a selected [`CartItem`] key.
const SELECTED: &str = "selected";

/// Query parameter carrying the key of the row to toggle, or [`ALL`].
const TOGGLE: &str = "toggle";

/// [`TOGGLE`] value toggling all the rows at once.
const ALL: &str = "all";

impl Row for CartItem {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }

    fn natural_key(&self) -> Option<String> {
        Some(self.diamond.certificate_number.to_string())
    }

    fn field(&self, key: &str) -> Option<String> {
        Some(match key {
            "certificateNumber" => self.diamond.certificate_number.to_string(),
            "title" => self.diamond.title(),
            "totalPrice" => self.diamond.total_price().to_string(),
            "addedAt" => self.added_at.to_date_string(),
            _ => return None,
        })
    }
}

/// Returns the [`Column`]s of the cart table.
fn columns<'a>() -> Vec<Column<'a, CartItem>> {
    vec![
        Column::new("certificateNumber", "Certificate").render(
            |i: &CartItem| {
                let cert = i.diamond.certificate_number.to_string();
                Cell::link(format!("/diamonds/{cert}"), cert)
            },
        ),
        Column::new("title", "Diamond"),
        Column::new("totalPrice", "Price"),
        Column::new("addedAt", "Added"),
    ]
}

/// Cart page.
///
/// The selection of the items is carried by the URL: a `toggle` parameter
/// changes it and redirects to the URL of the new selection.
///
/// # Errors
///
/// If the cart cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "cart", otel.name = SPAN_NAME),
)]
pub async fn index(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Error> {
    if !ctx.is_authorized() {
        return Ok(Page::storefront("Cart", "")
            .with_notice("Sign in to see your cart")
            .into_response());
    }

    let items = ctx
        .service()
        .execute(query::cart::Items::by(read::cart::Mine))
        .await
        .map_err(AsError::into_error)?;

    let selected = pairs
        .iter()
        .filter(|(k, _)| k == SELECTED)
        .map(|(_, v)| v.clone())
        .collect::<Vec<_>>();
    if let Some((_, toggle)) = pairs.iter().find(|(k, _)| k == TOGGLE) {
        let next = toggled(&items, &selected, toggle);
        return Ok(Redirect::to(&href(&next, None)).into_response());
    }

    Ok(render(&items, &selected).into_response())
}

/// Applies the provided `toggle` to the `selected` keys of the `items`
/// table, returning the new selected keys.
fn toggled(
    items: &[CartItem],
    selected: &[String],
    toggle: &str,
) -> Vec<String> {
    let mut next = None;
    {
        let mut table = Table::new(columns(), items).with_selection(
            Selection::Controlled {
                selected,
                on_change: Box::new(|keys: Vec<String>| next = Some(keys)),
            },
            "id",
        );
        if toggle == ALL {
            table.toggle_all();
        } else {
            table.toggle_row(toggle);
        }
    }
    next.unwrap_or_else(|| selected.to_vec())
}

/// Returns the URL of the cart page with the provided `selected` keys and
/// `toggle`.
fn href(selected: &[String], toggle: Option<&str>) -> String {
    let mut q = form_urlencoded::Serializer::new(String::new());
    for key in selected {
        _ = q.append_pair(SELECTED, key);
    }
    if let Some(toggle) = toggle {
        _ = q.append_pair(TOGGLE, toggle);
    }
    let q = q.finish();
    if q.is_empty() {
        PATH.to_owned()
    } else {
        format!("{PATH}?{q}")
    }
}

/// Body of the cart page.
#[derive(Debug, Template)]
#[template(path = "pages/cart.html")]
struct CartBody<'a> {
    /// Number of the items in the cart.
    total: usize,

    /// Number of the selected items.
    count: usize,

    /// [`Table`] of the items.
    table: Table<'a, CartItem>,
}

/// Renders the cart page of the provided `items`.
fn render<'a>(
    items: &'a [CartItem],
    selected: &'a [String],
) -> Page<CartBody<'a>> {
    let table = Table::new(columns(), items)
        .with_selection(
            Selection::Controlled {
                selected,
                on_change: Box::new(|_: Vec<String>| {}),
            },
            "id",
        )
        .with_toggle_all_href(href(selected, Some(ALL)));
    let count = table
        .keys()
        .iter()
        .filter(|k| table.is_selected(k))
        .count();

    Page::storefront(
        "Cart",
        CartBody {
            total: items.len(),
            count,
            table,
        },
    )
}

/// Form adding a diamond to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddForm {
    /// [`CertificateNumber`] of the added diamond.
    pub certificate_number: String,
}

/// Adds a diamond to the cart.
///
/// # Errors
///
/// Possible error codes:
/// - `INVALID_CERTIFICATE_NUMBER` - the provided certificate number is
///                                  malformed.
#[tracing::instrument(
    skip_all,
    fields(
        certificate_number = %form.certificate_number,
        http.page = "cart/add",
        otel.name = SPAN_NAME,
    ),
)]
pub async fn add(
    ctx: Context,
    Form(form): Form<AddForm>,
) -> Result<Redirect, Error> {
    let certificate_number =
        CertificateNumber::new(form.certificate_number.trim())
            .ok_or_else(|| Error::from(FormError::InvalidCertificateNumber))?;

    _ = ctx
        .service()
        .execute(AddToCart { certificate_number })
        .await
        .map_err(AsError::into_error)?;

    Ok(Redirect::to(PATH))
}

/// Removes the selected items from the cart at once, rendering the cart
/// left afterwards with a cleared selection.
///
/// # Errors
///
/// Possible error codes:
/// - `NOTHING_SELECTED` - no item is selected.
#[tracing::instrument(
    skip_all,
    fields(http.page = "cart/remove", otel.name = SPAN_NAME),
)]
pub async fn remove(
    ctx: Context,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, Error> {
    let ids = pairs
        .into_iter()
        .filter(|(k, _)| k == "id")
        .map(|(_, v)| cart::Id::from(v))
        .collect::<Vec<_>>();
    let count = ids.len();

    let items = ctx
        .service()
        .execute(RemoveCartItems { ids })
        .await
        .map_err(AsError::into_error)?;

    Ok(render(&items, &[])
        .with_notice(format!("Removed {count} items"))
        .into_response())
}
