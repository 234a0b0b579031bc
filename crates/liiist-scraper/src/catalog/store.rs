//! Store selection through the site's "pick up in store" flow.

use super::error::CatalogError;
use super::layout::CatalogLayout;
use super::session::{wait_for_element, BrowserSession, Locator, WaitPolicy};

/// Select the first store offered for `location` on a fresh session.
///
/// # Errors
///
/// Returns [`CatalogError::NoShopsFound`] when the picker lists no store for
/// `location`, [`CatalogError::ElementTimeout`] when a step of the flow does
/// not render, or the session error of a failed browser command.
pub async fn select_store<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    location: &str,
    policy: WaitPolicy,
) -> Result<(), CatalogError> {
    session.goto(&layout.landing_url).await?;
    click_when_present(session, &layout.pickup_button, policy).await?;

    pick_first_shop(session, layout, location, policy).await?;

    click_when_present(session, &layout.confirm_button, policy).await?;
    tracing::info!(location, "store selected");
    Ok(())
}

/// Switch an already selected store to the first one offered for `location`.
///
/// # Errors
///
/// Same as [`select_store`].
pub async fn reselect_store<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    location: &str,
    policy: WaitPolicy,
) -> Result<(), CatalogError> {
    click_when_present(session, &layout.store_badge, policy).await?;
    click_when_present(session, &layout.change_store_button, policy).await?;

    pick_first_shop(session, layout, location, policy).await?;
    tracing::info!(location, "store changed");
    Ok(())
}

async fn pick_first_shop<S: BrowserSession>(
    session: &mut S,
    layout: &CatalogLayout,
    location: &str,
    policy: WaitPolicy,
) -> Result<(), CatalogError> {
    click_when_present(session, &layout.location_input, policy).await?;
    session.send_keys(&layout.location_input, location).await?;

    // Enter before the autocomplete has answered submits raw text, which
    // the picker ignores. A missing dropdown is still worth a try.
    if let Err(error) = wait_for_element(session, &layout.location_suggestions, policy).await {
        tracing::warn!(location, %error, "no location suggestions; submitting anyway");
    }
    session.press_enter(&layout.location_input).await?;

    match wait_for_element(session, &layout.shop_cards, policy).await {
        Ok(()) => {}
        Err(CatalogError::ElementTimeout { .. }) => {
            return Err(CatalogError::NoShopsFound {
                location: location.to_owned(),
            });
        }
        Err(other) => return Err(other),
    }

    session.click(&layout.shop_cards).await
}

async fn click_when_present<S: BrowserSession>(
    session: &mut S,
    locator: &Locator,
    policy: WaitPolicy,
) -> Result<(), CatalogError> {
    wait_for_element(session, locator, policy).await?;
    session.click(locator).await
}
