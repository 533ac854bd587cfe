//! Inventory browsing pages.

use askama::Template;
use axum::{
    extract::{Path, Query},
    response::{IntoResponse as _, Response},
};
use common::pagination::Controller;
use service::{
    domain::{
        diamond::{Audience, Key, Lookup},
        Listing,
    },
    query::{self, diamonds::Browse},
    read::diamond::list::Selector,
    Query as _,
};
use url::form_urlencoded;

use crate::{
    define_error,
    page::{enquiries, Page, SPAN_NAME},
    view::{
        filter, listing, listing::Details, Cell, Comparison, FilterForm,
        Navigation, Selection, Table,
    },
    AsError, Context, Error,
};

/// Path of the storefront inventory page.
pub const STOREFRONT: &str = "/diamonds";

/// Path of the staff inventory page.
pub const BACK_OFFICE: &str = "/admin/diamonds";

/// Maximum number of diamonds compared side by side.
pub const MAX_COMPARED: usize = 4;

/// Paths the inventory pages of an [`Audience`] link to.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Base {
    /// Path of the inventory page.
    pub(crate) path: &'static str,

    /// Path of the comparison page.
    pub(crate) compare: &'static str,
}

impl From<Audience> for Base {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Customer => Self {
                path: STOREFRONT,
                compare: "/compare",
            },
            Audience::Staff => Self {
                path: BACK_OFFICE,
                compare: "/admin/compare",
            },
        }
    }
}

/// Storefront inventory page.
///
/// # Errors
///
/// If the inventory cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "diamonds", otel.name = SPAN_NAME),
)]
pub async fn index(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Error> {
    let body = browse(&ctx, &pairs, Audience::Customer).await?;
    Ok(Page::storefront("Diamonds", body).into_response())
}

/// Staff inventory page, listing the internal details.
///
/// # Errors
///
/// If the inventory cannot be fetched.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/diamonds", otel.name = SPAN_NAME),
)]
pub async fn inventory(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Error> {
    let body = browse(&ctx, &pairs, Audience::Staff).await?;
    Ok(Page::back_office("Inventory", body).into_response())
}

/// Body of an inventory page.
#[derive(Debug, Template)]
#[template(path = "pages/inventory.html")]
struct Inventory {
    /// [`FilterForm`] of the inventory.
    filter: FilterForm,

    /// [`Selector`] of the shown page.
    selector: Selector,

    /// [`Listing`]s of the shown page.
    listings: Vec<Listing>,

    /// Pagination state of the shown page.
    pagination: Controller,

    /// Selectable page sizes.
    page_sizes: Vec<u32>,

    /// [`Audience`] the inventory is shown to.
    audience: Audience,
}

impl Inventory {
    /// Returns the [`Results`] of the shown page.
    fn results(&self) -> Results<'_> {
        results(
            &self.selector,
            &self.listings,
            &self.pagination,
            &self.page_sizes,
            self.audience,
        )
    }
}

/// Fetches the inventory page selected by the query string `pairs`.
async fn browse(
    ctx: &Context,
    pairs: &[(String, String)],
    audience: Audience,
) -> Result<Inventory, Error> {
    let selector = filter::parse(pairs, ctx.service().config().page_size);
    let page = ctx
        .service()
        .execute(Browse {
            audience,
            selector: selector.clone(),
        })
        .await
        .map_err(AsError::into_error)?;

    let mut pagination = Controller::new(selector.arguments.limit);
    pagination.go_to(selector.arguments.page);
    pagination.apply(page.info);

    let base = Base::from(audience);
    Ok(Inventory {
        filter: FilterForm::new(
            &selector,
            base.path,
            Some(format!("{}/live", base.path)),
        ),
        selector,
        listings: page.items,
        pagination,
        page_sizes: ctx.page_sizes().to_vec(),
        audience,
    })
}

/// [`Listing`]s table of an inventory page along with its pagination
/// [`Navigation`].
#[derive(Debug, Template)]
#[template(path = "pages/results.html")]
pub(crate) struct Results<'a> {
    /// Path of the comparison page the selected rows are submitted to.
    compare: &'static str,

    /// [`Table`] of the [`Listing`]s.
    table: Table<'a, Listing>,

    /// [`Navigation`] keeping the filter across the pages.
    navigation: Navigation,
}

/// Creates the [`Results`] of the provided `listings` page.
pub(crate) fn results<'a>(
    selector: &Selector,
    listings: &'a [Listing],
    pagination: &Controller,
    page_sizes: &[u32],
    audience: Audience,
) -> Results<'a> {
    let base = Base::from(audience);
    let table = Table::new(
        listing::columns(audience == Audience::Staff),
        listings,
    )
    .with_selection(Selection::Uncontrolled(Vec::new()), "key");
    let navigation = Navigation::new(pagination, page_sizes, |args| {
        format!(
            "{}?{}",
            base.path,
            filter::query(&filter::with_arguments(selector, args)),
        )
    });

    Results {
        compare: base.compare,
        table,
        navigation,
    }
}

/// Returns the URL of the enquiry form about the diamond with the provided
/// certificate number.
fn enquire_href(certificate_number: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("certificateNumber", certificate_number)
        .finish();
    format!("{}?{query}", enquiries::PATH)
}

/// Body of the storefront page of a single diamond.
#[derive(Debug, Template)]
#[template(path = "pages/diamond.html")]
struct Showcase {
    /// [`Details`] of the diamond.
    details: Details,

    /// Certificate number added to the cart.
    certificate_number: String,

    /// URL of the enquiry form about the diamond.
    enquire: String,
}

/// Storefront page of a single diamond.
///
/// # Errors
///
/// Possible error codes:
/// - `DIAMOND_NOT_FOUND` - no diamond is listed under the provided key.
#[tracing::instrument(
    skip_all,
    fields(http.page = "diamond", key = %key, otel.name = SPAN_NAME),
)]
pub async fn details(
    ctx: Context,
    Path(key): Path<String>,
) -> Result<Response, Error> {
    let listing = lookup(&ctx, &key, Audience::Customer).await?;

    let certificate_number = listing.certificate_number().to_string();
    let body = Showcase {
        details: Details::new(&listing),
        enquire: enquire_href(&certificate_number),
        certificate_number,
    };
    Ok(Page::storefront(listing.public().title(), body).into_response())
}

/// Staff page of a single diamond.
///
/// # Errors
///
/// Possible error codes:
/// - `DIAMOND_NOT_FOUND` - no diamond is stored under the provided key.
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/diamond", key = %key, otel.name = SPAN_NAME),
)]
pub async fn record(
    ctx: Context,
    Path(key): Path<String>,
) -> Result<Response, Error> {
    let listing = lookup(&ctx, &key, Audience::Staff).await?;
    Ok(
        Page::back_office(listing.public().title(), Details::new(&listing))
            .into_response(),
    )
}

/// Looks up a single [`Listing`] by its raw `key`.
async fn lookup(
    ctx: &Context,
    key: &str,
    audience: Audience,
) -> Result<Listing, Error> {
    let key = key
        .parse::<Key>()
        .map_err(|_| Error::from(DiamondError::NotFound))?;
    ctx.service()
        .execute(query::diamond::ByKey::by(Lookup { key, audience }))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| DiamondError::NotFound.into())
}

/// Storefront comparison of the selected diamonds.
///
/// # Errors
///
/// Possible error codes:
/// - `NOTHING_TO_COMPARE` - less than two diamonds selected;
/// - `TOO_MANY_TO_COMPARE` - more than [`MAX_COMPARED`] diamonds selected;
/// - `DIAMOND_NOT_FOUND` - one of the selected diamonds is not listed.
#[tracing::instrument(
    skip_all,
    fields(http.page = "compare", otel.name = SPAN_NAME),
)]
pub async fn compare(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Error> {
    let body = comparison(&ctx, &pairs, Audience::Customer).await?;
    Ok(Page::storefront("Compare diamonds", body).into_response())
}

/// Staff comparison of the selected diamonds, including the trading
/// details.
///
/// # Errors
///
/// Same as [`compare()`].
#[tracing::instrument(
    skip_all,
    fields(http.page = "admin/compare", otel.name = SPAN_NAME),
)]
pub async fn compare_records(
    ctx: Context,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, Error> {
    let body = comparison(&ctx, &pairs, Audience::Staff).await?;
    Ok(Page::back_office("Compare diamonds", body).into_response())
}

/// Body of a comparison page.
#[derive(Debug, Template)]
#[template(path = "pages/compare.html")]
struct Compared {
    /// Compared [`Listing`]s.
    listings: Vec<Listing>,

    /// Paths the headings of the [`Listing`]s link to.
    base: Base,
}

impl Compared {
    /// Returns the [`Comparison`] of the [`Compared::listings`], headed by
    /// the links to their pages.
    fn comparison(&self) -> Comparison<'_, Listing> {
        let base = self.base;
        Comparison::new(listing::criteria(), &self.listings, move |l| {
            let key = Listing::id(l).map_or_else(
                || l.certificate_number().to_string(),
                ToString::to_string,
            );
            Cell::link(format!("{}/{key}", base.path), l.public().title())
        })
    }
}

/// Fetches the diamonds whose keys are listed under the `key` parameter.
async fn comparison(
    ctx: &Context,
    pairs: &[(String, String)],
    audience: Audience,
) -> Result<Compared, Error> {
    let mut keys = Vec::new();
    for (_, key) in pairs.iter().filter(|(name, _)| name == "key") {
        if !keys.contains(key) {
            keys.push(key.clone());
        }
    }
    if keys.len() < 2 {
        return Err(DiamondError::NothingToCompare.into());
    }
    if keys.len() > MAX_COMPARED {
        return Err(DiamondError::TooManyToCompare.into());
    }

    let listings = futures::future::try_join_all(
        keys.iter().map(|key| lookup(ctx, key, audience)),
    )
    .await?;

    Ok(Compared {
        listings,
        base: Base::from(audience),
    })
}

define_error! {
    enum DiamondError {
        #[code = "DIAMOND_NOT_FOUND"]
        #[status = NOT_FOUND]
        #[message = "Diamond is not found"]
        NotFound,

        #[code = "NOTHING_TO_COMPARE"]
        #[status = BAD_REQUEST]
        #[message = "Select at least two diamonds to compare"]
        NothingToCompare,

        #[code = "TOO_MANY_TO_COMPARE"]
        #[status = BAD_REQUEST]
        #[message = "At most 4 diamonds can be compared at once"]
        TooManyToCompare,
    }
}

#[cfg(test)]
mod spec {
    use common::pagination::{Controller, Info};
    use service::domain::{diamond::Audience, Listing, PublicDiamond};

    use super::{enquire_href, results};
    use crate::view::filter;

    fn listing(cert: &str) -> Listing {
        Listing::Public(
            serde_json::from_value::<PublicDiamond>(serde_json::json!({
                "certificateNumber": cert,
                "shape": "ROUND",
                "weight": 0.9,
                "lab": "GIA",
                "totalPrice": 4100,
            }))
            .unwrap(),
        )
    }

    #[test]
    fn pagination_links_keep_filter() {
        let pairs = vec![("color".to_owned(), "D".to_owned())];
        let selector = filter::parse(&pairs, 20);
        let mut pagination = Controller::new(20);
        pagination.apply(Info {
            current_page: 1,
            total_pages: 3,
            total_records: 41,
            records_per_page: 20,
            has_next_page: true,
            has_prev_page: false,
        });

        let html = results(
            &selector,
            &[listing("1111"), listing("2222")],
            &pagination,
            &[20, 50],
            Audience::Customer,
        )
        .to_string();

        assert!(
            html.contains(
                r#"href="/diamonds?color=D&#38;page=2&#38;limit=20""#,
            ),
            "{html}",
        );
        assert!(html.contains(r#"action="/compare""#), "{html}");
        assert!(
            html.contains(
                r#"<input type="checkbox" name="key" value="2222">"#,
            ),
            "{html}",
        );
    }

    #[test]
    fn empty_page_shows_placeholder() {
        let html = results(
            &filter::parse(&[], 20),
            &[],
            &Controller::new(20),
            &[20],
            Audience::Staff,
        )
        .to_string();

        assert!(html.contains("No data available"), "{html}");
        assert!(html.contains(r#"action="/admin/compare""#), "{html}");
    }

    #[test]
    fn enquire_link_encodes_certificate_number() {
        assert_eq!(
            enquire_href("2141438172"),
            "/enquiries?certificateNumber=2141438172",
        );
        assert_eq!(
            enquire_href("LG 12&x=1"),
            "/enquiries?certificateNumber=LG+12%26x%3D1",
        );
    }
}
