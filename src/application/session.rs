use crate::domain::cart::{
    CartLineItem, PhotographerGroup, PhotographerId, group_by_photographer,
};
use crate::domain::catalog::Photographer;
use crate::domain::checkout::{
    CheckoutState, CompletedOrder, PaymentSubmission, ProofImage, ProofKind,
};
use crate::domain::money::Money;
use crate::domain::ports::{Clipboard, GatewayBox, PhotographerDirectory};
use crate::error::{CheckoutError, Result};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a "copied" marker stays lit after a clipboard write.
pub const COPY_MARKER_TTL: Duration = Duration::from_secs(2);

/// What a call to [`CheckoutSession::submit`] produced.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Guard miss: no payment entry active, or one is already processing.
    Ignored,
    /// The submission was recorded; other photographers remain unpaid.
    Recorded,
    /// That was the last unpaid photographer. Fired at most once per
    /// session; the submissions travel with it and the session resets.
    Complete(CompletedOrder),
}

/// Tracks the most recently copied field for the transient "copied!"
/// marker. Cosmetic only.
#[derive(Debug, Default)]
pub struct CopyTracker {
    last: Option<(String, Instant)>,
}

impl CopyTracker {
    pub fn mark_at(&mut self, field: &str, at: Instant) {
        self.last = Some((field.to_string(), at));
    }

    pub fn is_copied_at(&self, field: &str, at: Instant) -> bool {
        match &self.last {
            Some((marked, when)) => {
                marked == field && at.duration_since(*when) < COPY_MARKER_TTL
            }
            None => false,
        }
    }
}

/// Formats one photographer's bank details and owed amount into a single
/// block for one-shot copying. Pure formatting, no state impact.
pub fn payment_copy_block(photographer: &Photographer, group: &PhotographerGroup) -> String {
    format!(
        "Photographer: {}\nBank: {}\nTax ID: {}\nPhone: {}\nAccount holder: {}\nPhotos: {}\nAmount: ${}",
        photographer.name,
        photographer.payment.bank,
        photographer.payment.tax_id,
        photographer.payment.phone,
        photographer.payment.account_holder,
        group.items.len(),
        group.subtotal,
    )
}

/// Drives one buyer through registering a payment for every photographer
/// owed money in the cart.
///
/// The session owns all checkout state for its lifetime; the only way to
/// mutate it is through the transition methods below. It is reusable after
/// completion or [`close`](Self::close).
pub struct CheckoutSession {
    groups: BTreeMap<PhotographerId, PhotographerGroup>,
    photographers: BTreeMap<PhotographerId, Photographer>,
    skipped: Vec<PhotographerId>,
    submissions: BTreeMap<PhotographerId, PaymentSubmission>,
    state: CheckoutState,
    total: Money,
    gateway: GatewayBox,
    copied: CopyTracker,
}

impl CheckoutSession {
    /// Groups the cart by photographer and resolves each group through the
    /// directory. Groups whose photographer is unknown are excluded from
    /// the session, logged, and surfaced via [`skipped`](Self::skipped);
    /// their amounts do not count towards the payable total.
    pub async fn open(
        items: &[CartLineItem],
        directory: &dyn PhotographerDirectory,
        gateway: GatewayBox,
    ) -> Result<Self> {
        let mut groups = group_by_photographer(items);
        let mut photographers = BTreeMap::new();
        let mut skipped = Vec::new();

        for id in groups.keys().cloned().collect::<Vec<_>>() {
            match directory.get(&id).await? {
                Some(photographer) => {
                    photographers.insert(id, photographer);
                }
                None => {
                    warn!(photographer = %id, "unknown photographer in cart, group skipped");
                    groups.remove(&id);
                    skipped.push(id);
                }
            }
        }

        let total = groups
            .values()
            .fold(Money::ZERO, |acc, group| acc + group.subtotal);

        Ok(Self {
            groups,
            photographers,
            skipped,
            submissions: BTreeMap::new(),
            state: CheckoutState::Summary,
            total,
            gateway,
            copied: CopyTracker::default(),
        })
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn groups(&self) -> &BTreeMap<PhotographerId, PhotographerGroup> {
        &self.groups
    }

    pub fn photographer(&self, id: &PhotographerId) -> Option<&Photographer> {
        self.photographers.get(id)
    }

    pub fn submission(&self, id: &PhotographerId) -> Option<&PaymentSubmission> {
        self.submissions.get(id)
    }

    /// Cart photographers dropped because the directory did not know them.
    pub fn skipped(&self) -> &[PhotographerId] {
        &self.skipped
    }

    /// Sum owed across all known photographers.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Photographers in the cart without a recorded submission yet.
    pub fn unpaid(&self) -> Vec<&PhotographerId> {
        self.groups
            .keys()
            .filter(|id| !self.submissions.contains_key(*id))
            .collect()
    }

    /// Terminal condition: every photographer owed money has a submission.
    pub fn is_complete(&self) -> bool {
        self.groups
            .keys()
            .all(|id| self.submissions.contains_key(id))
    }

    /// Opens the payment entry form for one photographer. Only valid from
    /// the summary view, and only for a known, still-unpaid photographer;
    /// guard misses are no-ops. Transient form fields start cleared.
    pub fn begin_payment(&mut self, id: &PhotographerId) -> bool {
        if self.state != CheckoutState::Summary {
            return false;
        }
        if !self.groups.contains_key(id) || self.submissions.contains_key(id) {
            return false;
        }
        self.state = CheckoutState::PaymentEntry {
            photographer: id.clone(),
            reference: String::new(),
            proof: None,
            submitting: false,
        };
        true
    }

    /// Updates the reference field of the active payment entry. Ignored
    /// outside payment entry or while a submission is processing.
    pub fn set_reference(&mut self, text: &str) {
        if let CheckoutState::PaymentEntry {
            reference,
            submitting: false,
            ..
        } = &mut self.state
        {
            text.clone_into(reference);
        }
    }

    /// Attaches a proof image to the active payment entry. Only PNG and
    /// JPEG are accepted; any other type is refused and the previously
    /// attached proof (if any) is kept. Returns whether the file was taken.
    pub fn attach_proof(&mut self, file_name: &str, mime: &str) -> bool {
        let CheckoutState::PaymentEntry {
            proof,
            submitting: false,
            ..
        } = &mut self.state
        else {
            return false;
        };
        let Some(kind) = ProofKind::from_mime(mime) else {
            return false;
        };
        *proof = Some(ProofImage {
            file_name: file_name.to_string(),
            kind,
        });
        true
    }

    /// Abandons the active payment entry; the photographer stays unpaid.
    /// Not available while a submission is processing.
    pub fn cancel_entry(&mut self) {
        if matches!(
            self.state,
            CheckoutState::PaymentEntry {
                submitting: false,
                ..
            }
        ) {
            self.state = CheckoutState::Summary;
        }
    }

    /// Submits the active payment entry to the gateway.
    ///
    /// A blank or whitespace-only reference is a validation error and the
    /// entry stays open. While the gateway call is in flight the entry is
    /// marked submitting, so a repeated invocation is ignored rather than
    /// double-registered. The unpaid set shrinks only after the ack comes
    /// back; if it then is empty, the submissions drain into a
    /// [`CompletedOrder`] and the session is reusable.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let submission = match &mut self.state {
            CheckoutState::PaymentEntry {
                submitting: true, ..
            } => return Ok(SubmitOutcome::Ignored),
            CheckoutState::PaymentEntry {
                photographer,
                reference,
                proof,
                submitting,
            } => {
                let submission =
                    PaymentSubmission::new(photographer.clone(), reference, proof.clone())?;
                *submitting = true;
                submission
            }
            _ => return Ok(SubmitOutcome::Ignored),
        };

        let ack = match self.gateway.submit(&submission).await {
            Ok(ack) => ack,
            Err(err) => {
                // Entry stays open so the buyer can try again.
                if let CheckoutState::PaymentEntry { submitting, .. } = &mut self.state {
                    *submitting = false;
                }
                return Err(err);
            }
        };
        debug!(photographer = %ack.photographer, "payment registered");

        self.submissions
            .insert(submission.photographer.clone(), submission);
        self.state = CheckoutState::Summary;

        if self.is_complete() {
            self.state = CheckoutState::AllPaid;
            let submissions = std::mem::take(&mut self.submissions)
                .into_values()
                .collect();
            return Ok(SubmitOutcome::Complete(CompletedOrder {
                submissions,
                total: self.total,
            }));
        }
        Ok(SubmitOutcome::Recorded)
    }

    /// Cancels the whole flow: drops any active entry and every recorded
    /// submission, back to the summary view. The owner treats this as
    /// cancellation of the checkout.
    pub fn close(&mut self) {
        self.submissions.clear();
        self.state = CheckoutState::Summary;
    }

    /// Copies one field's text through the clipboard port and lights its
    /// "copied" marker. On clipboard failure the marker stays unset.
    pub fn copy_field(
        &mut self,
        field_id: &str,
        text: &str,
        clipboard: &mut dyn Clipboard,
    ) -> Result<()> {
        clipboard.write_text(text)?;
        self.copied.mark_at(field_id, Instant::now());
        Ok(())
    }

    /// Copies the full payment block for one photographer.
    pub fn copy_payment_block(
        &mut self,
        id: &PhotographerId,
        clipboard: &mut dyn Clipboard,
    ) -> Result<()> {
        let block = match (self.photographers.get(id), self.groups.get(id)) {
            (Some(photographer), Some(group)) => payment_copy_block(photographer, group),
            _ => {
                return Err(CheckoutError::Validation(format!(
                    "Unknown photographer: {id}"
                )));
            }
        };
        clipboard.write_text(&block)?;
        self.copied.mark_at(&format!("all-{id}"), Instant::now());
        Ok(())
    }

    pub fn is_recently_copied(&self, field_id: &str) -> bool {
        self.copied.is_copied_at(field_id, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartLineItem;
    use crate::domain::catalog::{PaymentDetails, Photographer};
    use crate::domain::money::Price;
    use crate::infrastructure::in_memory::{
        BufferClipboard, InMemoryDirectory, SimulatedGateway,
    };
    use rust_decimal_macros::dec;

    fn photographer(id: &str, name: &str) -> Photographer {
        Photographer {
            id: id.into(),
            name: name.to_string(),
            logo_url: None,
            payment: PaymentDetails {
                bank: "Banco Nacional".to_string(),
                tax_id: "J-12345678-9".to_string(),
                phone: "+58 412 5551234".to_string(),
                account_holder: name.to_string(),
            },
        }
    }

    fn item(photo: &str, owner: &str, price: rust_decimal::Decimal) -> CartLineItem {
        CartLineItem {
            photo: photo.into(),
            photographer: owner.into(),
            price: Price::new(price).unwrap(),
        }
    }

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::seed(vec![
            photographer("mag", "MAG Fotografia"),
            photographer("richard", "Richard Bermudez"),
        ])
    }

    fn two_photographer_cart() -> Vec<CartLineItem> {
        vec![
            item("p1", "mag", dec!(5.00)),
            item("p2", "mag", dec!(5.00)),
            item("p3", "richard", dec!(7.50)),
        ]
    }

    async fn open(items: &[CartLineItem]) -> CheckoutSession {
        CheckoutSession::open(items, &directory(), Box::new(SimulatedGateway::default()))
            .await
            .unwrap()
    }

    async fn pay(session: &mut CheckoutSession, id: &str, reference: &str) -> SubmitOutcome {
        assert!(session.begin_payment(&id.into()));
        session.set_reference(reference);
        session.submit().await.unwrap()
    }

    #[tokio::test]
    async fn test_open_groups_and_totals() {
        let session = open(&two_photographer_cart()).await;
        assert_eq!(session.groups().len(), 2);
        assert_eq!(session.total(), Money::new(dec!(17.50)));
        assert_eq!(session.unpaid().len(), 2);
        assert_eq!(*session.state(), CheckoutState::Summary);
    }

    #[tokio::test]
    async fn test_full_checkout_scenario() {
        let mut session = open(&two_photographer_cart()).await;

        let outcome = pay(&mut session, "mag", "REF123").await;
        assert_eq!(outcome, SubmitOutcome::Recorded);
        assert_eq!(session.unpaid(), vec![&PhotographerId::from("richard")]);
        assert_eq!(session.submission(&"mag".into()).unwrap().reference, "REF123");

        let order = match pay(&mut session, "richard", "REF456").await {
            SubmitOutcome::Complete(order) => order,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(order.submissions.len(), 2);
        assert_eq!(order.total, Money::new(dec!(17.50)));
        assert_eq!(*session.state(), CheckoutState::AllPaid);
        // Session reset for reuse: submissions are gone.
        assert!(session.submission(&"mag".into()).is_none());
    }

    #[tokio::test]
    async fn test_begin_payment_guard_rejects_paid_photographer() {
        let mut session = open(&two_photographer_cart()).await;
        pay(&mut session, "mag", "REF123").await;

        assert!(!session.begin_payment(&"mag".into()));
        assert_eq!(*session.state(), CheckoutState::Summary);
    }

    #[tokio::test]
    async fn test_begin_payment_guard_rejects_unknown_photographer() {
        let mut session = open(&two_photographer_cart()).await;
        assert!(!session.begin_payment(&"nobody".into()));
    }

    #[tokio::test]
    async fn test_blank_reference_rejected() {
        let mut session = open(&two_photographer_cart()).await;
        assert!(session.begin_payment(&"mag".into()));

        session.set_reference("");
        assert!(matches!(
            session.submit().await,
            Err(CheckoutError::Validation(_))
        ));
        // Whitespace-only behaves identically.
        session.set_reference("   ");
        assert!(matches!(
            session.submit().await,
            Err(CheckoutError::Validation(_))
        ));
        // Entry is still open and the photographer still unpaid.
        assert!(matches!(session.state(), CheckoutState::PaymentEntry { .. }));
        assert_eq!(session.unpaid().len(), 2);
    }

    #[tokio::test]
    async fn test_cancel_entry_keeps_photographer_unpaid() {
        let mut session = open(&two_photographer_cart()).await;
        session.begin_payment(&"mag".into());
        session.set_reference("REF123");
        session.cancel_entry();

        assert_eq!(*session.state(), CheckoutState::Summary);
        assert_eq!(session.unpaid().len(), 2);
        // Re-entering starts from cleared fields.
        session.begin_payment(&"mag".into());
        match session.state() {
            CheckoutState::PaymentEntry { reference, proof, .. } => {
                assert!(reference.is_empty());
                assert!(proof.is_none());
            }
            other => panic!("expected payment entry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_proof_mime_filtering() {
        let mut session = open(&two_photographer_cart()).await;
        session.begin_payment(&"mag".into());

        assert!(!session.attach_proof("receipt.pdf", "application/pdf"));
        assert!(session.attach_proof("receipt.png", "image/png"));
        // Unsupported selection keeps the previous proof.
        assert!(!session.attach_proof("receipt.gif", "image/gif"));
        match session.state() {
            CheckoutState::PaymentEntry { proof: Some(proof), .. } => {
                assert_eq!(proof.file_name, "receipt.png");
                assert_eq!(proof.kind, ProofKind::Png);
            }
            other => panic!("expected attached proof, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_close_resets_submissions() {
        let mut session = open(&two_photographer_cart()).await;
        pay(&mut session, "mag", "REF123").await;
        session.close();

        assert_eq!(session.unpaid().len(), 2);
        assert_eq!(*session.state(), CheckoutState::Summary);
    }

    #[tokio::test]
    async fn test_unknown_photographer_group_skipped() {
        let mut items = two_photographer_cart();
        items.push(item("p4", "ghost", dec!(100.00)));

        let session = open(&items).await;
        assert_eq!(session.groups().len(), 2);
        assert_eq!(session.skipped(), &[PhotographerId::from("ghost")]);
        // The skipped amount does not count towards the payable total.
        assert_eq!(session.total(), Money::new(dec!(17.50)));
    }

    #[tokio::test]
    async fn test_copy_payment_block() {
        let mut session = open(&two_photographer_cart()).await;
        let mut clipboard = BufferClipboard::default();

        session
            .copy_payment_block(&"mag".into(), &mut clipboard)
            .unwrap();
        let text = clipboard.last().unwrap();
        assert!(text.contains("Photographer: MAG Fotografia"));
        assert!(text.contains("Bank: Banco Nacional"));
        assert!(text.contains("Photos: 2"));
        assert!(text.contains("Amount: $10.00"));
        assert!(session.is_recently_copied("all-mag"));
        assert!(!session.is_recently_copied("all-richard"));
    }

    #[tokio::test]
    async fn test_copy_single_field() {
        let mut session = open(&two_photographer_cart()).await;
        let mut clipboard = BufferClipboard::default();

        session
            .copy_field("bank-mag", "Banco Nacional", &mut clipboard)
            .unwrap();
        assert_eq!(clipboard.last(), Some("Banco Nacional"));
        assert!(session.is_recently_copied("bank-mag"));

        // Only the most recent field is lit.
        session
            .copy_field("phone-mag", "+58 412 5551234", &mut clipboard)
            .unwrap();
        assert!(session.is_recently_copied("phone-mag"));
        assert!(!session.is_recently_copied("bank-mag"));
    }

    #[tokio::test]
    async fn test_copy_marker_expires() {
        let mut tracker = CopyTracker::default();
        let start = Instant::now();
        tracker.mark_at("bank-mag", start);

        assert!(tracker.is_copied_at("bank-mag", start + Duration::from_millis(1500)));
        assert!(!tracker.is_copied_at("bank-mag", start + Duration::from_millis(2500)));
        assert!(!tracker.is_copied_at("phone-mag", start));
    }
}
