mod valuation;
