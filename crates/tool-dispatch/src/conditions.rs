use driver_port::{ElementHandle, Session, SessionError};
use framewise_core_types::Locator;

/// Node-local predicate: evaluated once per attempt during a poll, once per
/// context during a frame walk. Resolves to the element the action will be
/// applied to.
#[derive(Clone, Debug)]
pub(crate) enum Condition {
    /// A matching element that is currently displayed.
    Visible,
    /// A matching, displayed element whose text contains the needle.
    TextVisible(String),
    /// The first matching element, whatever its state.
    First,
    /// Exactly one matching element.
    Unique,
    /// Exactly one matching element whose text contains the needle. Several
    /// candidates are deliberately "no match" — single-result selection
    /// semantics keep a duplicated label from picking an arbitrary element.
    UniqueText(String),
}

pub(crate) async fn evaluate(
    session: &dyn Session,
    locator: &Locator,
    condition: &Condition,
) -> Result<Option<ElementHandle>, SessionError> {
    let matches = session.find_all(locator).await?;
    match condition {
        Condition::First => Ok(matches.into_iter().next()),

        Condition::Visible => {
            for element in matches {
                if element.is_displayed().await? {
                    return Ok(Some(element));
                }
            }
            Ok(None)
        }

        Condition::TextVisible(needle) => {
            for element in matches {
                if element.text().await?.contains(needle.as_str())
                    && element.is_displayed().await?
                {
                    return Ok(Some(element));
                }
            }
            Ok(None)
        }

        Condition::Unique => {
            if matches.len() == 1 {
                Ok(matches.into_iter().next())
            } else {
                Ok(None)
            }
        }

        Condition::UniqueText(needle) => {
            let mut hit = None;
            let mut candidates = 0usize;
            for element in matches {
                if element.text().await?.contains(needle.as_str()) {
                    candidates += 1;
                    hit = Some(element);
                }
            }
            Ok(if candidates == 1 { hit } else { None })
        }
    }
}
