use ptt_domain::{LedgerState, Mode, PreferencesPatch, UserPatch};

/// Mode, identity and preference updates. None of these touch ledger data.
pub struct ProfileService;

impl ProfileService {
    pub fn set_mode(state: &mut LedgerState, mode: Mode) {
        state.mode = mode;
    }

    /// Accepts any submitted identity; no credentials are checked.
    pub fn login(state: &mut LedgerState, patch: UserPatch) {
        state.user.merge(patch);
        state.user.is_logged_in = true;
    }

    pub fn logout(state: &mut LedgerState) {
        state.user.is_logged_in = false;
    }

    pub fn update_preferences(state: &mut LedgerState, patch: PreferencesPatch) {
        state.preferences.merge(patch);
    }
}
