//! Focus/break countdown state machine.
//!
//! The timer itself never sleeps. A background job calls [`Timer::tick`] once per
//! period with the generation it was started under; every transition that starts,
//! stops or replaces a job bumps the generation, so a displaced job observes the
//! mismatch on its next wake and exits without mutating anything.

use crate::domain::value_object::{BreakLength, TimerLength};

/// Run state of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
        }
    }
}

/// Which interval the countdown currently represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Focus,
    Break,
}

impl Cycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cycle::Focus => "focus",
            Cycle::Break => "break",
        }
    }
}

/// Handle identifying one started timer job
pub type TimerGeneration = u64;

/// Result of applying one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The job was displaced or the timer is no longer running; the job must exit.
    Stale,
    /// One second elapsed.
    Ticked { remaining: u32, should_broadcast: bool },
    /// Focus ran out and the break started automatically; the job keeps running.
    BreakStarted,
    /// Break ran out; the timer is back to an idle focus interval and the job must exit.
    CycleCompleted,
}

impl TickOutcome {
    pub fn keeps_running(&self) -> bool {
        matches!(self, TickOutcome::Ticked { .. } | TickOutcome::BreakStarted)
    }
}

/// Countdown state shared by everyone in a room
#[derive(Debug, Clone)]
pub struct Timer {
    timer_length: TimerLength,
    break_length: BreakLength,
    status: TimerStatus,
    cycle: Cycle,
    remaining: u32,
    generation: TimerGeneration,
}

impl Timer {
    pub fn new(timer_length: TimerLength, break_length: BreakLength) -> Self {
        Self {
            timer_length,
            break_length,
            status: TimerStatus::Idle,
            cycle: Cycle::Focus,
            remaining: timer_length.seconds(),
            generation: 0,
        }
    }

    pub fn timer_length(&self) -> TimerLength {
        self.timer_length
    }

    pub fn break_length(&self) -> BreakLength {
        self.break_length
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn cycle(&self) -> Cycle {
        self.cycle
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Upper bound of `remaining` for the current cycle
    pub fn cycle_length(&self) -> u32 {
        match self.cycle {
            Cycle::Focus => self.timer_length.seconds(),
            Cycle::Break => self.break_length.seconds(),
        }
    }

    /// Whether a job started under `generation` is still the active one
    pub fn is_current_job(&self, generation: TimerGeneration) -> bool {
        self.status == TimerStatus::Running && self.generation == generation
    }

    fn cancel_job(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn install_job(&mut self) -> TimerGeneration {
        self.cancel_job();
        self.status = TimerStatus::Running;
        self.generation
    }

    /// Start (or resume) the focus interval.
    ///
    /// Switching from a break, or starting from idle, refills `remaining`;
    /// resuming a paused focus keeps it.
    pub fn start_focus(&mut self) -> TimerGeneration {
        if self.cycle != Cycle::Focus {
            self.cycle = Cycle::Focus;
            self.remaining = self.timer_length.seconds();
        } else if self.status == TimerStatus::Idle {
            self.remaining = self.timer_length.seconds();
        }
        self.install_job()
    }

    pub fn start_break(&mut self) -> TimerGeneration {
        self.cycle = Cycle::Break;
        self.remaining = self.break_length.seconds();
        self.install_job()
    }

    /// Returns `false` (no-op) unless the timer is running.
    pub fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.cancel_job();
        self.status = TimerStatus::Paused;
        true
    }

    pub fn reset(&mut self) {
        self.cancel_job();
        self.cycle = Cycle::Focus;
        self.status = TimerStatus::Idle;
        self.remaining = self.timer_length.seconds();
    }

    /// Returns `false` (no-op) unless the break cycle is active.
    pub fn skip_break(&mut self) -> bool {
        if self.cycle != Cycle::Break {
            return false;
        }
        self.reset();
        true
    }

    /// Replace both lengths, clamping `remaining` down to the active cycle's new bound.
    /// Status, cycle and any running job are untouched.
    pub fn apply_lengths(&mut self, timer_length: TimerLength, break_length: BreakLength) {
        self.timer_length = timer_length;
        self.break_length = break_length;
        self.remaining = self.remaining.min(self.cycle_length());
    }

    pub fn tick(&mut self, generation: TimerGeneration) -> TickOutcome {
        if !self.is_current_job(generation) {
            return TickOutcome::Stale;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return TickOutcome::Ticked {
                remaining: self.remaining,
                should_broadcast: self.remaining % 5 == 0 || self.remaining <= 10,
            };
        }

        match self.cycle {
            Cycle::Focus => {
                self.cycle = Cycle::Break;
                self.remaining = self.break_length.seconds();
                TickOutcome::BreakStarted
            }
            Cycle::Break => {
                self.reset();
                TickOutcome::CycleCompleted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_timer() -> Timer {
        Timer::new(TimerLength::new(60).unwrap(), BreakLength::new(60).unwrap())
    }

    fn run_ticks(timer: &mut Timer, generation: TimerGeneration, count: usize) -> TickOutcome {
        let mut last = TickOutcome::Stale;
        for _ in 0..count {
            last = timer.tick(generation);
        }
        last
    }

    #[test]
    fn test_new_timer_is_idle_focus_and_full() {
        // テスト項目: 新規タイマーは idle / focus / 残り時間が満タン
        // given (前提条件):

        // when (操作):
        let timer = create_test_timer();

        // then (期待する結果):
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.cycle(), Cycle::Focus);
        assert_eq!(timer.remaining(), 60);
    }

    #[test]
    fn test_start_focus_from_paused_keeps_remaining() {
        // テスト項目: 一時停止から focus を再開すると残り時間が保持される
        // given (前提条件):
        let mut timer = create_test_timer();
        let generation = timer.start_focus();
        run_ticks(&mut timer, generation, 7);
        assert!(timer.pause());

        // when (操作):
        timer.start_focus();

        // then (期待する結果):
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.remaining(), 53);
    }

    #[test]
    fn test_start_focus_from_break_refills_focus_length() {
        // テスト項目: 休憩中に focus を開始すると focus 長にリセットされる
        // given (前提条件):
        let mut timer = Timer::new(TimerLength::new(120).unwrap(), BreakLength::new(60).unwrap());
        timer.start_break();

        // when (操作):
        timer.start_focus();

        // then (期待する結果):
        assert_eq!(timer.cycle(), Cycle::Focus);
        assert_eq!(timer.remaining(), 120);
    }

    #[test]
    fn test_restart_displaces_previous_job() {
        // テスト項目: 再スタートすると古いジョブの tick は Stale になり、状態を変更しない
        // given (前提条件):
        let mut timer = create_test_timer();
        let old = timer.start_focus();
        let new = timer.start_focus();

        // when (操作):
        let stale = timer.tick(old);
        let fresh = timer.tick(new);

        // then (期待する結果):
        assert_eq!(stale, TickOutcome::Stale);
        assert_eq!(
            fresh,
            TickOutcome::Ticked {
                remaining: 59,
                should_broadcast: false
            }
        );
    }

    #[test]
    fn test_pause_is_noop_unless_running() {
        // テスト項目: 実行中でなければ pause は何もしない（冪等性）
        // given (前提条件):
        let mut timer = create_test_timer();

        // when (操作):
        let idle_pause = timer.pause();
        timer.start_focus();
        let first_pause = timer.pause();
        let second_pause = timer.pause();

        // then (期待する結果):
        assert!(!idle_pause);
        assert!(first_pause);
        assert!(!second_pause);
        assert_eq!(timer.status(), TimerStatus::Paused);
    }

    #[test]
    fn test_skip_break_is_noop_during_focus() {
        // テスト項目: focus 中の skip_break は何もしない
        // given (前提条件):
        let mut timer = create_test_timer();
        let generation = timer.start_focus();

        // when (操作):
        let skipped = timer.skip_break();

        // then (期待する結果):
        assert!(!skipped);
        assert!(timer.is_current_job(generation));
    }

    #[test]
    fn test_skip_break_returns_to_idle_focus() {
        // テスト項目: 休憩中の skip_break で idle / focus に戻り、ジョブが無効化される
        // given (前提条件):
        let mut timer = create_test_timer();
        let generation = timer.start_break();

        // when (操作):
        let skipped = timer.skip_break();

        // then (期待する結果):
        assert!(skipped);
        assert_eq!(timer.cycle(), Cycle::Focus);
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.tick(generation), TickOutcome::Stale);
    }

    #[test]
    fn test_broadcast_cadence() {
        // テスト項目: 5 の倍数または残り 10 秒以下のときのみブロードキャスト対象になる
        // given (前提条件):
        let mut timer = create_test_timer();
        let generation = timer.start_focus();

        // when (操作):
        let flags: Vec<(u32, bool)> = (0..59)
            .map(|_| match timer.tick(generation) {
                TickOutcome::Ticked {
                    remaining,
                    should_broadcast,
                } => (remaining, should_broadcast),
                other => panic!("unexpected outcome {:?}", other),
            })
            .collect();

        // then (期待する結果):
        for (remaining, should_broadcast) in flags {
            assert_eq!(should_broadcast, remaining % 5 == 0 || remaining <= 10);
        }
    }

    #[test]
    fn test_focus_expiry_starts_break_then_cycle_completes() {
        // テスト項目: focus 終了で自動的に休憩へ、休憩終了で idle focus に戻りジョブ終了
        // given (前提条件):
        let mut timer = Timer::new(TimerLength::new(60).unwrap(), BreakLength::new(90).unwrap());
        let generation = timer.start_focus();

        // when (操作):
        let at_focus_end = run_ticks(&mut timer, generation, 60);

        // then (期待する結果):
        assert_eq!(at_focus_end, TickOutcome::BreakStarted);
        assert_eq!(timer.cycle(), Cycle::Break);
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.remaining(), 90);

        // when (操作):
        let at_break_end = run_ticks(&mut timer, generation, 90);

        // then (期待する結果):
        assert_eq!(at_break_end, TickOutcome::CycleCompleted);
        assert_eq!(timer.cycle(), Cycle::Focus);
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.tick(generation), TickOutcome::Stale);
    }

    #[test]
    fn test_apply_lengths_only_clamps_down() {
        // テスト項目: 長さ変更は残り時間を新しい上限まで切り下げるのみで、増やさない
        // given (前提条件):
        let mut timer = Timer::new(TimerLength::new(600).unwrap(), BreakLength::new(60).unwrap());
        let generation = timer.start_focus();
        run_ticks(&mut timer, generation, 100);

        // when (操作):
        timer.apply_lengths(TimerLength::new(300).unwrap(), BreakLength::new(60).unwrap());
        let clamped = timer.remaining();
        timer.apply_lengths(TimerLength::new(7200).unwrap(), BreakLength::new(60).unwrap());

        // then (期待する結果):
        assert_eq!(clamped, 300);
        assert_eq!(timer.remaining(), 300);
        assert!(timer.is_current_job(generation));
    }

    #[test]
    fn test_apply_unchanged_lengths_is_noop() {
        // テスト項目: 同じ長さを適用しても状態は変わらない
        // given (前提条件):
        let mut timer = create_test_timer();
        let generation = timer.start_focus();
        run_ticks(&mut timer, generation, 3);

        // when (操作):
        timer.apply_lengths(timer.timer_length(), timer.break_length());

        // then (期待する結果):
        assert_eq!(timer.remaining(), 57);
        assert_eq!(timer.status(), TimerStatus::Running);
        assert_eq!(timer.cycle(), Cycle::Focus);
        assert!(timer.is_current_job(generation));
    }

    #[test]
    fn test_remaining_stays_within_cycle_bounds() {
        // テスト項目: どの操作列でも残り時間は現在サイクルの上限以内に収まる
        // given (前提条件):
        let mut timer = Timer::new(TimerLength::new(90).unwrap(), BreakLength::new(60).unwrap());

        // when (操作) / then (期待する結果):
        let mut generation = timer.start_break();
        for step in 0..400 {
            match step % 7 {
                0 => generation = timer.start_focus(),
                3 => {
                    timer.pause();
                }
                5 => generation = timer.start_break(),
                6 if step % 3 == 0 => {
                    timer.skip_break();
                }
                _ => {
                    timer.tick(generation);
                }
            }
            assert!(timer.remaining() <= timer.cycle_length());
        }
    }
}
