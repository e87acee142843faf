use sortrace_core::{ExecutionContext, Pause, SortError, State};

/// Adjacent-pass bubble sort with early exit on a swap-free pass.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n < 2 {
        return finish(ctx, 0);
    }

    for pass in 0..n - 1 {
        let mut swapped = false;

        for j in 0..n - pass - 1 {
            ctx.set_state(j, State::Comparing);
            ctx.set_state(j + 1, State::Comparing);
            ctx.record_comparison();
            ctx.chime(ctx.value(j + 1));
            ctx.render();
            ctx.suspend(Pause::Step).await?;

            if ctx.value(j) > ctx.value(j + 1) {
                ctx.set_state(j, State::Swapping);
                ctx.set_state(j + 1, State::Swapping);
                ctx.render();
                ctx.suspend(Pause::Brief).await?;

                ctx.exchange(j, j + 1);
                ctx.record_swap();
                swapped = true;
            }

            ctx.set_state(j, State::Default);
            ctx.set_state(j + 1, State::Default);
            ctx.render();
        }

        let settled = n - 1 - pass;
        ctx.set_state(settled, State::Sorted);
        ctx.report_progress(pass + 1);

        if !swapped {
            // Nothing moved, so the unsorted prefix is already in order.
            return finish(ctx, settled);
        }
    }

    finish(ctx, 1)
}

/// Mark `0..upto` sorted and publish the final frame.
fn finish<C: ExecutionContext>(ctx: &mut C, upto: usize) -> Result<(), SortError> {
    for k in 0..upto.max(ctx.len().min(1)) {
        ctx.set_state(k, State::Sorted);
    }
    ctx.report_progress(ctx.len());
    ctx.render();
    Ok(())
}
