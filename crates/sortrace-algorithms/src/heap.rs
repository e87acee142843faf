use sortrace_core::{ExecutionContext, Pause, SortError, State};

/// Heap sort: bottom-up max-heap build, then repeated root extraction.
pub async fn sort<C: ExecutionContext>(ctx: &mut C) -> Result<(), SortError> {
    let n = ctx.len();
    if n == 0 {
        return Ok(());
    }

    for root in (0..n / 2).rev() {
        sift_down(ctx, n, root).await?;
    }

    for end in (1..n).rev() {
        ctx.set_state(0, State::Swapping);
        ctx.set_state(end, State::Swapping);
        ctx.render();
        ctx.suspend(Pause::Long).await?;

        ctx.exchange(0, end);
        ctx.record_swap();
        ctx.set_state(end, State::Sorted);
        ctx.set_state(0, State::Default);
        ctx.report_progress(n - end);
        ctx.render();

        sift_down(ctx, end, 0).await?;
    }

    ctx.set_state(0, State::Sorted);
    ctx.report_progress(n);
    ctx.render();
    Ok(())
}

/// Restore the heap property below `node` within `0..heap_len`.
///
/// Iterative form of the recursive sift: after a swap it continues into the
/// displaced child's subtree.
async fn sift_down<C: ExecutionContext>(
    ctx: &mut C,
    heap_len: usize,
    mut node: usize,
) -> Result<(), SortError> {
    loop {
        let mut largest = node;
        ctx.set_state(node, State::Current);

        for child in [2 * node + 1, 2 * node + 2] {
            if child >= heap_len {
                continue;
            }
            ctx.set_state(child, State::Comparing);
            ctx.record_comparison();
            ctx.chime(ctx.value(child));
            ctx.render();
            ctx.suspend(Pause::Step).await?;

            if ctx.value(child) > ctx.value(largest) {
                largest = child;
            }
            ctx.set_state(child, State::Default);
        }

        if largest == node {
            ctx.set_state(node, State::Default);
            return Ok(());
        }

        ctx.set_state(node, State::Swapping);
        ctx.set_state(largest, State::Swapping);
        ctx.render();
        ctx.suspend(Pause::Long).await?;

        ctx.exchange(node, largest);
        ctx.record_swap();
        ctx.set_state(node, State::Default);
        ctx.set_state(largest, State::Default);
        node = largest;
    }
}
