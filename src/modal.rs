//! Overlay state. At most one overlay is open at a time.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Promo,
    Help,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<Modal>,
}

impl ModalState {
    /// Opening replaces whatever overlay was showing.
    pub fn open(&mut self, modal: Modal) {
        self.open = Some(modal);
    }

    pub fn close(&mut self) -> Option<Modal> {
        self.open.take()
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        self.open == Some(modal)
    }

    pub fn current(&self) -> Option<Modal> {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_overlay_at_a_time() {
        let mut modal = ModalState::default();
        modal.open(Modal::Promo);
        modal.open(Modal::Help);
        assert!(modal.is_open(Modal::Help));
        assert!(!modal.is_open(Modal::Promo));
        assert_eq!(modal.close(), Some(Modal::Help));
        assert_eq!(modal.current(), None);
    }
}
