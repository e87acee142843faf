use sortrace_core::{ExecutionContext, Pause, SortError, State};

/// Insertion sort. The key travels left by exchanges, so the sequence stays
/// a permutation of the input even if the run stops mid-shift.
///
/// Every probe of the left neighbour counts as one comparison, including the
/// probe that ends the shift.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n == 0 {
        return Ok(());
    }
    ctx.set_state(0, State::Sorted);

    for i in 1..n {
        ctx.set_state(i, State::Current);
        ctx.render();
        ctx.suspend(Pause::Step).await?;

        let mut j = i;
        while j > 0 {
            ctx.set_state(j - 1, State::Comparing);
            ctx.record_comparison();
            ctx.chime(ctx.value(j - 1));
            ctx.render();
            ctx.suspend(Pause::Step).await?;

            if ctx.value(j - 1) <= ctx.value(j) {
                ctx.set_state(j - 1, State::Sorted);
                break;
            }

            // key moves to j - 1 and keeps its `Current` highlight
            ctx.exchange(j - 1, j);
            ctx.set_state(j, State::Swapping);
            ctx.record_swap();
            ctx.render();
            ctx.suspend(Pause::Brief).await?;

            ctx.set_state(j, State::Sorted);
            j -= 1;
        }

        ctx.set_state(j, State::Sorted);
        for k in 0..=i {
            if ctx.state(k) != State::Sorted {
                ctx.set_state(k, State::Sorted);
            }
        }
        ctx.report_progress(i + 1);
        ctx.render();
    }

    Ok(())
}
