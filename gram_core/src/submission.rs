/// Where a form is in its submission lifecycle. There's only ever room for
/// one request in flight; `Submitting` holds a copy of it so the flow can
/// refer back to exactly what was sent once the server answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<Req> {
    /// Waiting for the user
    Idle,

    /// A request is out and we haven't heard back
    Submitting(Req),

    /// We got what we came for. Nothing else happens on this screen.
    Finished,
}

impl<Req: Clone> Submission<Req> {
    /// The busy flag. While this is true, submit controls are disabled and
    /// further submissions are ignored.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Try to start a submission. Only works from `Idle`; gives back the
    /// request to send if it did.
    pub fn begin(&mut self, req: Req) -> Option<Req> {
        match self {
            Self::Idle => {
                *self = Self::Submitting(req.clone());
                Some(req)
            }
            Self::Submitting(_) | Self::Finished => None,
        }
    }

    /// The server answered and the user should be able to try again. Returns
    /// the request that was in flight, if there was one.
    pub fn reset(&mut self) -> Option<Req> {
        match std::mem::replace(self, Self::Idle) {
            Self::Submitting(req) => Some(req),
            Self::Idle => None,
            Self::Finished => {
                *self = Self::Finished;
                None
            }
        }
    }

    /// The server answered and we're done here. Returns the request that was
    /// in flight, if there was one.
    pub fn finish(&mut self) -> Option<Req> {
        match std::mem::replace(self, Self::Finished) {
            Self::Submitting(req) => Some(req),
            Self::Idle | Self::Finished => None,
        }
    }
}
