use sortrace_core::{ExecutionContext, Pause, SortError, State};

/// Quick sort with a Lomuto partition on the last element of each range.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n == 0 {
        return Ok(());
    }
    sort_range(ctx, 0, n - 1).await?;

    // pivots are already sorted; this picks up the one-element ranges
    for k in 0..n {
        ctx.set_state(k, State::Sorted);
    }
    ctx.report_progress(n);
    ctx.render();
    Ok(())
}

/// Sort the inclusive range `low..=high`, left subrange first.
///
/// Ranges of one element are left alone; [`sort`] marks them sorted once
/// every pivot is placed.
pub async fn sort_range<C: ExecutionContext>(
    ctx: &mut C,
    low: usize,
    high: usize,
) -> Result<(), SortError> {
    let mut placed = 0;
    let mut stack = vec![(low, high)];

    while let Some((lo, hi)) = stack.pop() {
        if lo == hi {
            continue;
        }

        let p = partition(ctx, lo, hi).await?;
        placed += 1;
        ctx.report_progress(placed);

        // pushed right first so the left side is popped first
        if p < hi {
            stack.push((p + 1, hi));
        }
        if p > lo {
            stack.push((lo, p - 1));
        }
    }

    Ok(())
}

/// Returns the pivot's final index.
async fn partition<C: ExecutionContext>(
    ctx: &mut C,
    low: usize,
    high: usize,
) -> Result<usize, SortError> {
    let pivot = ctx.value(high);
    ctx.set_state(high, State::Pivot);
    let mut store = low;

    for j in low..high {
        ctx.set_state(j, State::Comparing);
        ctx.record_comparison();
        ctx.chime(ctx.value(j));
        ctx.render();
        ctx.suspend(Pause::Step).await?;

        if ctx.value(j) < pivot {
            if store != j {
                ctx.set_state(store, State::Swapping);
                ctx.set_state(j, State::Swapping);
                ctx.render();
                ctx.suspend(Pause::Brief).await?;

                ctx.exchange(store, j);
                ctx.record_swap();
                ctx.set_state(store, State::Default);
            }
            store += 1;
        }
        ctx.set_state(j, State::Default);
    }

    ctx.set_state(store, State::Swapping);
    ctx.set_state(high, State::Swapping);
    ctx.render();
    ctx.suspend(Pause::Long).await?;

    if store != high {
        ctx.exchange(store, high);
        ctx.record_swap();
        ctx.set_state(high, State::Default);
    }
    ctx.set_state(store, State::Sorted);
    ctx.render();

    Ok(store)
}
