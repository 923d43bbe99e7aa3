//! Invoice creation seam.

use crate::Result;

/// Creates the Lightning invoice a pay response hands back to the sender.
///
/// The receiving VASP's node (or node provider) sits behind this trait. The
/// `metadata` string must be committed to by the invoice's description hash.
pub trait InvoiceCreator: Send + Sync {
    /// Create an invoice for `amount_msats` and return its encoded payment request.
    fn create_uma_invoice(&self, amount_msats: u64, metadata: &str) -> Result<String>;
}

impl<T: InvoiceCreator + ?Sized> InvoiceCreator for &T {
    fn create_uma_invoice(&self, amount_msats: u64, metadata: &str) -> Result<String> {
        (**self).create_uma_invoice(amount_msats, metadata)
    }
}

impl<T: InvoiceCreator + ?Sized> InvoiceCreator for std::sync::Arc<T> {
    fn create_uma_invoice(&self, amount_msats: u64, metadata: &str) -> Result<String> {
        (**self).create_uma_invoice(amount_msats, metadata)
    }
}
