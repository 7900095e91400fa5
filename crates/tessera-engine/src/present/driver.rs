use anyhow::Result;

use super::backend::PresentBackend;
use super::presenter::FramePresenter;

/// Directive returned by the event pump.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Pull-style frame loop for hosts that poll their own events.
///
/// Each iteration pumps events (which may reconfigure the presenter or ask
/// to exit), runs the per-frame update, then ticks the presenter. The first
/// fatal error stops the loop and is returned; in-flight GPU work is left
/// to finish on its own.
pub fn run_loop<B, P, U>(presenter: &mut FramePresenter<B>, mut pump: P, mut update: U) -> Result<()>
where
    B: PresentBackend,
    P: FnMut(&mut FramePresenter<B>) -> Result<LoopControl>,
    U: FnMut(&mut B),
{
    loop {
        if pump(presenter)? == LoopControl::Exit {
            log::debug!("frame loop exit requested");
            return Ok(());
        }

        update(presenter.backend_mut());
        presenter.tick()?;
    }
}
