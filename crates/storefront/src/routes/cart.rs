//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Cart IDs are stored in the session and mapped to Shopify carts.
//!
//! All mutations go through `POST /cart`; see [`crate::models::cart_form`]
//! for the form protocol.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use soap_store_core::{CartId, LineQuantity};
use tower_sessions::Session;
use tracing::instrument;

use super::ImageView;
use super::layout::LayoutView;
use crate::error::{AppError, add_breadcrumb};
use crate::filters;
use crate::middleware::CspNonce;
use crate::models::{CartAction, CartForm, session_keys};
use crate::shopify::ShopifyError;
use crate::shopify::types::{Cart, CartLine, CartLineUpdateInput, Money};
use crate::state::AppState;

/// HTMX event fired after every cart mutation.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Where the cart is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartLayout {
    Page,
    Aside,
}

impl CartLayout {
    #[must_use]
    pub const fn is_aside(self) -> bool {
        matches!(self, Self::Aside)
    }

    #[must_use]
    pub const fn summary_class(self) -> &'static str {
        match self {
            Self::Page => "cart-summary-page",
            Self::Aside => "cart-summary-aside",
        }
    }
}

// =============================================================================
// View Models
// =============================================================================

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_title: String,
    pub options: Vec<(String, String)>,
    /// `/products/{handle}?{option}={value}`
    pub url: String,
    pub image: Option<ImageView>,
    pub quantity: u32,
    pub can_decrement: bool,
    /// `cartFormInput` for the decrease button.
    pub decrement_input: String,
    /// `cartFormInput` for the increase button.
    pub increment_input: String,
    /// `cartFormInput` for the remove button.
    pub remove_input: String,
    /// Line total, when both unit and total cost are known.
    pub price: Option<String>,
    /// Unit compare-at price, when the line is discounted.
    pub compare_at_price: Option<String>,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let merchandise = &line.merchandise;
        let quantity = LineQuantity::new(line.quantity);

        let update = |quantity: u32| {
            CartAction::LinesUpdate {
                lines: vec![CartLineUpdateInput {
                    id: line.id.clone(),
                    quantity,
                }],
            }
            .to_form_value()
        };

        // A line with no unit or total cost shows no price at all
        let price = match (&line.cost.amount_per_quantity, &line.cost.total_amount) {
            (Some(_), Some(total)) => format_amount(total),
            _ => None,
        };
        let compare_at_price = price.as_ref().and_then(|_| {
            line.cost
                .compare_at_amount_per_quantity
                .as_ref()
                .and_then(format_amount)
        });

        Self {
            product_title: merchandise.product.title.clone(),
            options: merchandise
                .selected_options
                .iter()
                .map(|o| (o.name.clone(), o.value.clone()))
                .collect(),
            url: variant_url(
                &merchandise.product.handle,
                merchandise
                    .selected_options
                    .iter()
                    .map(|o| (o.name.as_str(), o.value.as_str())),
            ),
            image: merchandise.image.as_ref().map(|img| {
                ImageView::new(img, &merchandise.product.title)
            }),
            quantity: quantity.get(),
            can_decrement: quantity.can_decrement(),
            decrement_input: update(quantity.previous()),
            increment_input: update(quantity.next()),
            remove_input: CartAction::LinesRemove {
                line_ids: vec![line.id.clone()],
            }
            .to_form_value(),
            price,
            compare_at_price,
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub layout: CartLayout,
    pub lines: Vec<CartLineView>,
    pub total_quantity: u32,
    /// Formatted subtotal, `-` when Shopify sent none.
    pub subtotal: String,
    pub checkout_url: String,
    /// Applicable discount codes.
    pub discount_codes: Vec<String>,
    /// `cartFormInput` for the remove-discount button.
    pub discount_remove_input: String,
    /// `cartFormInput` for the apply-discount form.
    pub discount_apply_input: String,
    /// Messages from Shopify about the last mutation.
    pub errors: Vec<String>,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty(layout: CartLayout) -> Self {
        Self::new(None, layout)
    }

    #[must_use]
    pub fn new(cart: Option<&Cart>, layout: CartLayout) -> Self {
        let discount_codes = cart.map(Cart::applicable_discount_codes).unwrap_or_default();

        Self {
            layout,
            lines: cart
                .map(|c| c.lines.iter().map(CartLineView::from).collect())
                .unwrap_or_default(),
            total_quantity: cart.map_or(0, |c| c.total_quantity),
            subtotal: cart
                .and_then(|c| c.cost.subtotal.as_ref())
                .and_then(Money::to_price)
                .map_or_else(|| "-".to_string(), |p| p.display()),
            checkout_url: cart.map(|c| c.checkout_url.clone()).unwrap_or_default(),
            discount_remove_input: CartAction::DiscountCodesUpdate {
                discount_codes: Vec::new(),
            }
            .to_form_value(),
            discount_apply_input: CartAction::DiscountCodesUpdate {
                discount_codes: discount_codes.clone(),
            }
            .to_form_value(),
            discount_codes,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    #[must_use]
    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Summary, discounts and checkout only appear once something is in the cart.
    #[must_use]
    pub const fn show_summary(&self) -> bool {
        self.total_quantity > 0
    }

    #[must_use]
    pub fn main_class(&self) -> &'static str {
        if self.discount_codes.is_empty() {
            "cart-main"
        } else {
            "cart-main with-discount"
        }
    }

    /// Extra `<form>` attributes: drawer forms post over HTMX and swap the
    /// drawer; page forms are plain posts.
    #[must_use]
    pub const fn form_attrs(&self) -> &'static str {
        if self.layout.is_aside() {
            r##"hx-post="/cart" hx-target="#cart-drawer" hx-swap="innerHTML" hx-disabled-elt="find button""##
        } else {
            ""
        }
    }

    #[must_use]
    pub fn discount_codes_joined(&self) -> String {
        self.discount_codes.join(", ")
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format a Shopify amount, dropping `.00` on whole amounts.
fn format_amount(money: &Money) -> Option<String> {
    money.to_price().map(|p| p.display_without_trailing_zeros())
}

/// Product URL that preselects the line's variant options.
#[must_use]
pub fn variant_url<'a>(
    handle: &str,
    options: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> String {
    let query = options
        .into_iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        format!("/products/{handle}")
    } else {
        format!("/products/{handle}?{query}")
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<CartId> {
    session
        .get::<CartId>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Set the cart ID in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: &CartId,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ID, cart_id).await
}

/// Forget a cart Shopify no longer knows about.
async fn clear_cart_id(session: &Session) {
    if let Err(e) = session.remove::<CartId>(session_keys::CART_ID).await {
        tracing::warn!("Failed to clear cart ID from session: {e}");
    }
}

/// Stash mutation errors for the next `/cart` page render.
async fn set_flash_errors(session: &Session, errors: &[String]) {
    if let Err(e) = session.insert(session_keys::CART_ERRORS, errors).await {
        tracing::warn!("Failed to store cart errors in session: {e}");
    }
}

async fn take_flash_errors(session: &Session) -> Vec<String> {
    session
        .remove::<Vec<String>>(session_keys::CART_ERRORS)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Fetch the visitor's cart, if any.
///
/// Failures degrade to "no cart"; an expired cart is dropped from the session.
async fn load_cart(state: &AppState, session: &Session) -> Option<Cart> {
    let cart_id = get_cart_id(session).await?;

    match state.storefront().get_cart(&cart_id).await {
        Ok(Some(cart)) => Some(cart),
        Ok(None) => {
            tracing::info!(cart_id = %cart_id, "Cart no longer exists, clearing session");
            clear_cart_id(session).await;
            None
        }
        Err(e) => {
            tracing::warn!("Failed to fetch cart {cart_id}: {e}");
            None
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub layout: LayoutView,
    pub cart: CartView,
}

/// Cart drawer fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_drawer.html")]
pub struct CartDrawerTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    let (layout, cart) = tokio::join!(
        LayoutView::load(&state, "/cart", nonce),
        load_cart(&state, &session)
    );
    let errors = take_flash_errors(&session).await;

    CartShowTemplate {
        layout,
        cart: CartView::new(cart.as_ref(), CartLayout::Page).with_errors(errors),
    }
}

/// Cart drawer contents (HTMX).
#[instrument(skip(state, session))]
pub async fn drawer(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&state, &session).await;

    CartDrawerTemplate {
        cart: CartView::new(cart.as_ref(), CartLayout::Aside),
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let count = load_cart(&state, &session)
        .await
        .map_or(0, |cart| cart.total_quantity);

    CartCountTemplate { count }
}

/// Apply a cart form action.
///
/// HTMX requests get the refreshed drawer and a `cart-updated` trigger;
/// plain form posts are redirected to `redirectTo` or `/cart`.
///
/// # Errors
///
/// Returns `400 Bad Request` for a malformed or unknown `cartFormInput`.
#[instrument(skip(state, session, headers, form))]
pub async fn action(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Form(form): Form<CartForm>,
) -> Result<Response, AppError> {
    let action = form.action()?;
    let action_name = action.name();
    let cart_id = get_cart_id(&session).await;

    tracing::info!(action = action_name, has_cart = cart_id.is_some(), "Cart action");
    match &cart_id {
        Some(id) => add_breadcrumb("cart", action_name, Some(&[("cart_id", id.as_str())])),
        None => add_breadcrumb("cart", action_name, None),
    }

    let result = apply_action(&state, cart_id.as_ref(), action).await;

    let (cart, errors) = match result {
        Ok(Some(cart)) => {
            if cart_id.as_ref() != Some(&cart.id) {
                set_cart_id(&session, &cart.id).await?;
            }
            (Some(cart), Vec::new())
        }
        Ok(None) => (None, Vec::new()),
        Err(ShopifyError::UserError(message)) => {
            tracing::info!(action = action_name, "Cart action rejected: {message}");
            (load_cart(&state, &session).await, vec![message])
        }
        Err(e) => {
            tracing::error!(action = action_name, "Cart action failed: {e}");
            (load_cart(&state, &session).await, Vec::new())
        }
    };

    if is_htmx(&headers) {
        return Ok((
            AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
            CartDrawerTemplate {
                cart: CartView::new(cart.as_ref(), CartLayout::Aside).with_errors(errors),
            },
        )
            .into_response());
    }

    if !errors.is_empty() {
        set_flash_errors(&session, &errors).await;
    }

    Ok(Redirect::to(form.redirect_target().unwrap_or("/cart")).into_response())
}

/// Forward an action to Shopify.
///
/// Returns `Ok(None)` without calling Shopify when the action needs an
/// existing cart and the visitor has none.
async fn apply_action(
    state: &AppState,
    cart_id: Option<&CartId>,
    action: CartAction,
) -> Result<Option<Cart>, ShopifyError> {
    let storefront = state.storefront();

    let cart = match (action, cart_id) {
        (CartAction::LinesAdd { lines }, None) => storefront.create_cart(lines).await?,
        (CartAction::LinesAdd { lines }, Some(id)) => storefront.add_to_cart(id, lines).await?,
        (_, None) => return Ok(None),
        (CartAction::LinesUpdate { lines }, Some(id)) => {
            storefront.update_cart_lines(id, lines).await?
        }
        (CartAction::LinesRemove { line_ids }, Some(id)) => {
            storefront.remove_from_cart(id, line_ids).await?
        }
        (CartAction::DiscountCodesUpdate { discount_codes }, Some(id)) => {
            storefront.update_discount_codes(id, discount_codes).await?
        }
    };

    Ok(Some(cart))
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "true")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::shopify::types::{
        CartCost, CartDiscountCode, CartLineCost, CartMerchandise, CartMerchandiseProduct, Image,
        SelectedOption,
    };
    use soap_store_core::{CartLineId, MerchandiseId, ProductId};

    fn money(amount: &str) -> Money {
        Money {
            amount: amount.to_string(),
            currency_code: "USD".to_string(),
        }
    }

    fn line(id: &str, quantity: u32) -> CartLine {
        CartLine {
            id: CartLineId::parse(&format!("gid://shopify/CartLine/{id}")).unwrap(),
            quantity,
            attributes: Vec::new(),
            cost: CartLineCost {
                amount_per_quantity: Some(money("6.0")),
                compare_at_amount_per_quantity: None,
                subtotal_amount: Some(money("6.0")),
                total_amount: Some(money(&format!("{}.0", 6 * quantity))),
            },
            merchandise: CartMerchandise {
                id: MerchandiseId::parse("gid://shopify/ProductVariant/v1").unwrap(),
                title: "Lavender".to_string(),
                available_for_sale: true,
                requires_shipping: true,
                price: Some(money("6.0")),
                compare_at_price: None,
                selected_options: vec![SelectedOption {
                    name: "Scent".to_string(),
                    value: "Lavender & Oat".to_string(),
                }],
                image: Some(Image {
                    id: None,
                    url: "https://cdn.shopify.com/lav.jpg".to_string(),
                    alt_text: None,
                    width: Some(100),
                    height: Some(100),
                }),
                product: CartMerchandiseProduct {
                    id: ProductId::parse("gid://shopify/Product/p1").unwrap(),
                    handle: "lavender-bar".to_string(),
                    title: "Lavender Bar".to_string(),
                    vendor: String::new(),
                },
            },
        }
    }

    fn cart(lines: Vec<CartLine>) -> Cart {
        Cart {
            id: CartId::parse("gid://shopify/Cart/c1?key=k").unwrap(),
            checkout_url: "https://soap-store.myshopify.com/cart/c/c1?key=k".to_string(),
            updated_at: None,
            note: None,
            total_quantity: lines.iter().map(|l| l.quantity).sum(),
            cost: CartCost {
                subtotal: Some(money("18.0")),
                total: Some(money("18.0")),
                total_tax: None,
                total_duty: None,
            },
            discount_codes: Vec::new(),
            lines,
        }
    }

    fn render_drawer(view: CartView) -> String {
        CartDrawerTemplate { cart: view }.render().unwrap()
    }

    #[test]
    fn test_empty_cart_shows_message_without_summary() {
        let html = render_drawer(CartView::empty(CartLayout::Aside));
        assert!(html.contains("Looks like you haven't added anything yet"));
        assert!(html.contains("Continue shopping →"));
        assert!(!html.contains("cart-summary-aside"));
        assert!(!html.contains("Continue to Checkout"));
    }

    #[test]
    fn test_cart_with_lines_hides_empty_message() {
        let view = CartView::new(Some(&cart(vec![line("l1", 3)])), CartLayout::Aside);
        let html = render_drawer(view);
        assert!(html.contains("class=\"cart-empty\" hidden"));
        assert!(html.contains("cart-summary-aside"));
        assert!(html.contains("Quantity: 3"));
        assert!(html.contains("Continue to Checkout →"));
        assert!(html.contains("$18.00"));
    }

    #[test]
    fn test_single_quantity_cannot_decrement() {
        let view = CartLineView::from(&line("l1", 1));
        assert!(!view.can_decrement);
        assert!(view.decrement_input.contains(r#""quantity":0"#));
        assert!(view.increment_input.contains(r#""quantity":2"#));

        let html = render_drawer(CartView::new(Some(&cart(vec![line("l1", 1)])), CartLayout::Aside));
        assert!(html.contains("aria-label=\"Decrease quantity\" disabled"));
    }

    #[test]
    fn test_decrement_proposes_one_less() {
        let view = CartLineView::from(&line("l1", 3));
        assert!(view.can_decrement);
        let parsed: CartAction = serde_json::from_str(&view.decrement_input).unwrap();
        assert_eq!(
            parsed,
            CartAction::LinesUpdate {
                lines: vec![CartLineUpdateInput {
                    id: CartLineId::parse("gid://shopify/CartLine/l1").unwrap(),
                    quantity: 2,
                }]
            }
        );
    }

    #[test]
    fn test_remove_submits_line_id() {
        let view = CartLineView::from(&line("l1", 2));
        let parsed: CartAction = serde_json::from_str(&view.remove_input).unwrap();
        assert_eq!(
            parsed,
            CartAction::LinesRemove {
                line_ids: vec![CartLineId::parse("gid://shopify/CartLine/l1").unwrap()]
            }
        );
    }

    #[test]
    fn test_line_price_drops_trailing_zeros() {
        let view = CartLineView::from(&line("l1", 2));
        assert_eq!(view.price.as_deref(), Some("$12"));
        assert!(view.compare_at_price.is_none());
    }

    #[test]
    fn test_line_price_omitted_without_costs() {
        let mut l = line("l1", 2);
        l.cost.amount_per_quantity = None;
        l.cost.compare_at_amount_per_quantity = Some(money("8.0"));
        let view = CartLineView::from(&l);
        assert!(view.price.is_none());
        assert!(view.compare_at_price.is_none());
    }

    #[test]
    fn test_compare_at_price() {
        let mut l = line("l1", 1);
        l.cost.compare_at_amount_per_quantity = Some(money("8.5"));
        let view = CartLineView::from(&l);
        assert_eq!(view.compare_at_price.as_deref(), Some("$8.50"));
    }

    #[test]
    fn test_line_links_to_variant() {
        let view = CartLineView::from(&line("l1", 1));
        assert_eq!(view.url, "/products/lavender-bar?Scent=Lavender%20%26%20Oat");
    }

    #[test]
    fn test_line_without_image() {
        let mut l = line("l1", 1);
        l.merchandise.image = None;
        let html = render_drawer(CartView::new(Some(&cart(vec![l])), CartLayout::Aside));
        assert!(!html.contains("<img"));
        assert!(html.contains("Lavender Bar"));
    }

    #[test]
    fn test_line_image_carries_dimensions() {
        let html = render_drawer(CartView::new(Some(&cart(vec![line("l1", 1)])), CartLayout::Aside));
        assert!(html.contains(r#"alt="Lavender Bar" width="100" height="100""#));
    }

    #[test]
    fn test_page_and_drawer_lines_share_no_element_ids() {
        // The cart page and the lazily loaded drawer render the same lines
        let c = cart(vec![line("l1", 1)]);
        let page = render_drawer(CartView::new(Some(&c), CartLayout::Page));
        let aside = render_drawer(CartView::new(Some(&c), CartLayout::Aside));
        for html in [page, aside] {
            assert!(!html.contains("id=\"gid://"));
            assert!(html.contains(r#"<li class="cart-line">"#));
        }
    }

    #[test]
    fn test_applicable_discount_sets_class_and_lists_code() {
        let mut c = cart(vec![line("l1", 1)]);
        c.discount_codes = vec![
            CartDiscountCode {
                code: "SUDS10".to_string(),
                applicable: true,
            },
            CartDiscountCode {
                code: "OLD".to_string(),
                applicable: false,
            },
        ];
        let view = CartView::new(Some(&c), CartLayout::Aside);
        assert_eq!(view.main_class(), "cart-main with-discount");
        assert_eq!(view.discount_codes_joined(), "SUDS10");
        assert!(view.discount_apply_input.contains("SUDS10"));
        assert!(view.discount_remove_input.contains(r#""discountCodes":[]"#));

        let html = render_drawer(view);
        assert!(html.contains("cart-main with-discount"));
        assert!(html.contains("<code>SUDS10</code>"));
        assert!(!html.contains("OLD"));
    }

    #[test]
    fn test_no_discount_class_without_applicable_codes() {
        let view = CartView::new(Some(&cart(vec![line("l1", 1)])), CartLayout::Page);
        assert_eq!(view.main_class(), "cart-main");
        let html = render_drawer(view);
        assert!(html.contains("name=\"discountCode\""));
        assert!(!html.contains("cart-discount-applied"));
    }

    #[test]
    fn test_missing_checkout_url_hides_link() {
        let mut c = cart(vec![line("l1", 1)]);
        c.checkout_url = String::new();
        let html = render_drawer(CartView::new(Some(&c), CartLayout::Aside));
        assert!(!html.contains("Continue to Checkout"));
    }

    #[test]
    fn test_missing_subtotal_renders_dash() {
        let mut c = cart(vec![line("l1", 1)]);
        c.cost.subtotal = None;
        let view = CartView::new(Some(&c), CartLayout::Page);
        assert_eq!(view.subtotal, "-");
    }

    #[test]
    fn test_errors_rendered() {
        let view = CartView::empty(CartLayout::Aside)
            .with_errors(vec!["Discount code is not valid".to_string()]);
        let html = render_drawer(view);
        assert!(html.contains("Discount code is not valid"));
    }

    #[test]
    fn test_count_template() {
        let html = CartCountTemplate { count: 0 }.render().unwrap();
        assert_eq!(html.trim(), "0");
    }

    #[test]
    fn test_variant_url_without_options() {
        assert_eq!(variant_url("oat-bar", []), "/products/oat-bar");
    }

    #[test]
    fn test_is_htmx() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("HX-Request", "true".parse().unwrap());
        assert!(is_htmx(&headers));
    }
}
