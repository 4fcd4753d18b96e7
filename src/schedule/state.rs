//! Running balance of a loan while the schedule is rolled forward

/// Outstanding balance at a point in the schedule
#[derive(Debug, Clone)]
pub struct BalanceState {
    /// Current period (0 = loan origination, before any payment)
    pub period: u32,

    /// Balance at the start of the current period
    pub opening_balance: f64,

    /// Balance after the current period's payment
    pub ending_balance: f64,
}

impl BalanceState {
    /// Row 0: the implicit origination row, balance = principal
    pub fn at_origination(principal: f64) -> Self {
        Self {
            period: 0,
            opening_balance: principal,
            ending_balance: principal,
        }
    }

    /// Advance to the next period; its opening balance is the prior ending balance
    pub fn advance_month(&mut self) {
        self.period += 1;
        self.opening_balance = self.ending_balance;
    }

    /// Interest accrued on the opening balance
    pub fn interest_due(&self, monthly_rate: f64) -> f64 {
        self.opening_balance * monthly_rate
    }

    /// Apply the principal part of a payment
    pub fn repay(&mut self, principal_portion: f64) {
        self.ending_balance = self.opening_balance - principal_portion;
    }
}
