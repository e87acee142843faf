use sortrace_core::{ExecutionContext, Pause, SortError, State};

/// Selection sort. Scans the whole unsorted suffix for every position, so the
/// comparison count is n(n-1)/2 whatever the input order.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n == 0 {
        return Ok(());
    }

    for i in 0..n - 1 {
        let mut min = i;
        ctx.set_state(i, State::Current);

        for j in i + 1..n {
            ctx.set_state(j, State::Comparing);
            ctx.record_comparison();
            ctx.chime(ctx.value(j));
            ctx.render();
            ctx.suspend(Pause::Step).await?;

            if ctx.value(j) < ctx.value(min) {
                if min != i {
                    ctx.set_state(min, State::Default);
                }
                min = j;
                ctx.set_state(min, State::Pivot);
            } else {
                ctx.set_state(j, State::Default);
            }
        }

        if min != i {
            ctx.set_state(i, State::Swapping);
            ctx.set_state(min, State::Swapping);
            ctx.render();
            ctx.suspend(Pause::Long).await?;

            ctx.exchange(i, min);
            ctx.record_swap();
            ctx.set_state(min, State::Default);
        }

        ctx.set_state(i, State::Sorted);
        ctx.report_progress(i + 1);
        ctx.render();
    }

    ctx.set_state(n - 1, State::Sorted);
    ctx.report_progress(n);
    ctx.render();
    Ok(())
}
